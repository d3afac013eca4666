use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shakmaty::{Color, Move};
use tracing::{debug, warn};

use crate::{
    config::{AgentConfig, EvaluatorKind},
    error::EngineError,
    evaluate::{Evaluator, HeuristicEvaluator},
    neural::{NeuralEvaluator, OnnxModel, ScalarModel},
    rules::Game,
    search::Search,
    stochastic::StochasticSelector,
};

/// How an agent turns scores into a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Best move by alpha-beta minimax; ties go to the earlier ordered move.
    AlphaBeta,
    /// Softmax-sampled move over full-width rollouts.
    Sampled,
}

impl From<EvaluatorKind> for Policy {
    fn from(kind: EvaluatorKind) -> Self {
        match kind {
            EvaluatorKind::Heuristic => Policy::AlphaBeta,
            EvaluatorKind::Neural => Policy::Sampled,
        }
    }
}

/// A player bound to one color, one search depth and one evaluator.
pub struct Agent {
    color: Color,
    depth: u32,
    policy: Policy,
    evaluator: Box<dyn Evaluator>,
    rng: ChaCha8Rng,
}

impl Agent {
    /// Build the agent described by `config`, loading the value model
    /// when the neural evaluator is selected.
    pub fn new(config: &AgentConfig) -> Result<Self, EngineError> {
        let evaluator: Box<dyn Evaluator> = match config.evaluator {
            EvaluatorKind::Heuristic => Box::new(HeuristicEvaluator),
            EvaluatorKind::Neural => {
                let path = config
                    .model_path
                    .as_ref()
                    .ok_or(EngineError::MissingModelPath)?;
                Box::new(NeuralEvaluator::new(OnnxModel::from_file(path, config.backend)?))
            }
        };

        Ok(Self::with_evaluator(
            config.color(),
            config.search_depth,
            config.evaluator.into(),
            evaluator,
            config.seed,
        ))
    }

    pub fn with_evaluator(
        color: Color,
        depth: u32,
        policy: Policy,
        evaluator: Box<dyn Evaluator>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            color,
            depth,
            policy,
            evaluator,
            rng,
        }
    }

    pub fn heuristic(color: Color, depth: u32) -> Self {
        Self::with_evaluator(
            color,
            depth,
            Policy::AlphaBeta,
            Box::new(HeuristicEvaluator),
            None,
        )
    }

    pub fn neural<M: ScalarModel + 'static>(color: Color, depth: u32, model: M, seed: u64) -> Self {
        Self::with_evaluator(
            color,
            depth,
            Policy::Sampled,
            Box::new(NeuralEvaluator::new(model)),
            Some(seed),
        )
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Pick a move for the agent's color.
    ///
    /// Returns `Ok(None)` when the game is over (no legal move, or
    /// insufficient material), and also for a zero search depth, where
    /// only the root is evaluated and move choice is left to the caller.
    pub fn choose_move(&mut self, game: &mut Game) -> Result<Option<Move>, EngineError> {
        if game.is_terminal() {
            debug!(color = ?self.color, "game is over");
            return Ok(None);
        }

        if self.depth == 0 {
            let score = self.evaluator.evaluate(game.position())?;
            warn!(score, "search depth 0: static evaluation only, no move chosen");
            return Ok(None);
        }

        if game.side_to_move() != self.color {
            debug!(color = ?self.color, to_move = ?game.side_to_move(), "choosing out of turn");
        }

        match self.policy {
            Policy::AlphaBeta => {
                let maximizing = self.color.is_white();
                let mut search = Search::new(self.evaluator.as_mut());
                Ok(search.run(game, self.depth, maximizing)?.best_move)
            }
            Policy::Sampled => {
                let mut selector =
                    StochasticSelector::new(self.evaluator.as_mut(), self.color, self.depth);
                selector.choose(game, &mut self.rng)
            }
        }
    }
}
