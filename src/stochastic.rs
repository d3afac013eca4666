//! Temperature-sampled move selection.
//!
//! Each root move is scored with a full-width rollout whose leaves are
//! evaluated from the agent's point of view, the scores are turned into
//! a softmax distribution and one move is drawn from it. Temperature
//! falls with the move number, so play sharpens as the game goes on.

use rand::{Rng, distributions::Distribution, distributions::WeightedIndex};
use shakmaty::{Chess, Color, Move};
use tracing::{debug, trace};

use crate::{
    error::EngineError,
    evaluate::Evaluator,
    rules::Game,
    search::minimax,
    types::{MoveProbability, Score, ScoredMove},
};

pub const INITIAL_TEMPERATURE: f64 = 1.5;
pub const TEMPERATURE_DECAY: f64 = 0.06;
pub const MIN_TEMPERATURE: f64 = 0.1;

/// `max(0.1, 1.5 - 0.06 * move_number)`.
pub fn temperature(move_number: u32) -> f64 {
    (INITIAL_TEMPERATURE - TEMPERATURE_DECAY * f64::from(move_number)).max(MIN_TEMPERATURE)
}

/// Numerically stable softmax of `scores / temperature`.
///
/// `temperature` must be positive. An empty input yields an empty
/// distribution.
pub fn softmax(scores: &[f64], temperature: f64) -> Vec<f64> {
    let scaled: Vec<f64> = scores.iter().map(|s| s / temperature).collect();
    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scaled.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Samples moves by rolling out every root move with `evaluator` at the
/// leaves.
pub struct StochasticSelector<'e, E: ?Sized> {
    evaluator: &'e mut E,
    color: Color,
    depth: u32,
}

impl<'e, E: Evaluator + ?Sized> StochasticSelector<'e, E> {
    /// `depth` counts the root ply: candidates are rolled out
    /// `depth - 1` plies deep.
    pub fn new(evaluator: &'e mut E, color: Color, depth: u32) -> Self {
        Self {
            evaluator,
            color,
            depth,
        }
    }

    /// Rollout score of every legal root move, in generation order.
    ///
    /// Scores are from the agent's point of view (positive is good for
    /// `color`).
    pub fn score_candidates(&mut self, game: &mut Game) -> Result<Vec<ScoredMove>, EngineError> {
        let rollout_depth = self.depth.saturating_sub(1);

        let mut scored = Vec::new();
        for mv in game.legal_moves() {
            let score = {
                let mut child = game.push(&mv);
                rollout_score(&mut child, &mut *self.evaluator, self.color, rollout_depth)?
            };
            trace!(mv = ?mv, score, "rollout");
            scored.push(ScoredMove { mv, score });
        }
        Ok(scored)
    }

    /// Softmax inputs for the scored candidates.
    ///
    /// Rollout scores are already from the agent's side, yet a Black
    /// agent negates them once more here, so for Black the distribution
    /// ends up favoring White-good outcomes. Kept as observed; see
    /// DESIGN.md before changing it.
    pub fn softmax_inputs(&self, scored: &[ScoredMove]) -> Vec<f64> {
        scored
            .iter()
            .map(|c| f64::from(self.color.fold_wb(c.score, -c.score)))
            .collect()
    }

    /// Move probabilities at the current position.
    pub fn distribution(&mut self, game: &mut Game) -> Result<Vec<MoveProbability>, EngineError> {
        let temperature = temperature(game.fullmove_number());
        let scored = self.score_candidates(game)?;
        let probabilities = softmax(&self.softmax_inputs(&scored), temperature);

        Ok(scored
            .into_iter()
            .zip(probabilities)
            .map(|(c, probability)| MoveProbability {
                mv: c.mv,
                probability,
            })
            .collect())
    }

    /// Draws one move, or `None` when there is no legal move.
    pub fn choose<R: Rng + ?Sized>(
        &mut self,
        game: &mut Game,
        rng: &mut R,
    ) -> Result<Option<Move>, EngineError> {
        let distribution = self.distribution(game)?;
        if distribution.is_empty() {
            return Ok(None);
        }

        let index = WeightedIndex::new(distribution.iter().map(|p| p.probability))?;
        let picked = distribution[index.sample(rng)].mv.clone();
        debug!(
            color = ?self.color,
            depth = self.depth,
            temperature = temperature(game.fullmove_number()),
            candidates = distribution.len(),
            picked = ?picked,
            "stochastic move chosen"
        );
        Ok(Some(picked))
    }
}

/// Convenience for callers that hold no selector: sample a move for
/// `color` from `game`.
pub fn choose_stochastic<E, R>(
    game: &mut Game,
    evaluator: &mut E,
    color: Color,
    depth: u32,
    rng: &mut R,
) -> Result<Option<Move>, EngineError>
where
    E: Evaluator + ?Sized,
    R: Rng + ?Sized,
{
    StochasticSelector::new(evaluator, color, depth).choose(game, rng)
}

/// Full-width minimax value of `game` from `color`'s side. `color`
/// maximizes whenever it is to move.
pub fn rollout_score(
    game: &mut Game,
    evaluator: &mut (impl Evaluator + ?Sized),
    color: Color,
    depth: u32,
) -> Result<Score, EngineError> {
    let mut leaf = |position: &Chess| evaluator.evaluate_for(position, color);
    let maximizing = game.side_to_move() == color;
    minimax(game, depth, maximizing, &mut leaf)
}
