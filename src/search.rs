//! Depth-limited minimax.
//!
//! [`Search`] is the pruning search used to pick a move outright.
//! [`minimax`] is the full-width variant: every child is scored exactly,
//! which the stochastic selector needs because non-best scores feed its
//! softmax.

use shakmaty::Chess;
use tracing::debug;

use crate::{
    error::EngineError,
    evaluate::Evaluator,
    ordering::ordered_legal_moves,
    rules::Game,
    types::{Score, SearchResult},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
}

/// Alpha-beta search over one evaluator.
pub struct Search<'e, E: ?Sized> {
    evaluator: &'e mut E,
    stats: SearchStats,
}

impl<'e, E: Evaluator + ?Sized> Search<'e, E> {
    pub fn new(evaluator: &'e mut E) -> Self {
        Self {
            evaluator,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Root search with an open window. `maximizing` is true when the
    /// side to move wants White-relative scores as high as possible.
    pub fn run(
        &mut self,
        game: &mut Game,
        depth: u32,
        maximizing: bool,
    ) -> Result<SearchResult, EngineError> {
        self.stats = SearchStats::default();
        let result =
            self.alpha_beta(game, depth, Score::NEG_INFINITY, Score::INFINITY, maximizing)?;
        debug!(
            depth,
            maximizing,
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            cutoffs = self.stats.cutoffs,
            score = result.score,
            best_move = ?result.best_move,
            "alpha-beta search finished"
        );
        Ok(result)
    }

    pub fn alpha_beta(
        &mut self,
        game: &mut Game,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<SearchResult, EngineError> {
        self.stats.nodes += 1;
        if depth == 0 || game.is_terminal() {
            self.stats.leaves += 1;
            return Ok(SearchResult::leaf(self.evaluator.evaluate(game.position())?));
        }

        let mut best = SearchResult::leaf(if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        });

        for mv in ordered_legal_moves(game) {
            let score = {
                let mut child = game.push(&mv);
                self.alpha_beta(&mut child, depth - 1, alpha, beta, !maximizing)?
                    .score
            };

            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        score,
                        best_move: Some(mv),
                    };
                }
                alpha = alpha.max(score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        score,
                        best_move: Some(mv),
                    };
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}

/// Full-width minimax returning only the score. `leaf` scores positions
/// at depth 0 and at game-over nodes.
pub fn minimax<F>(
    game: &mut Game,
    depth: u32,
    maximizing: bool,
    leaf: &mut F,
) -> Result<Score, EngineError>
where
    F: FnMut(&Chess) -> Result<Score, EngineError>,
{
    if depth == 0 || game.is_terminal() {
        return leaf(game.position());
    }

    let mut best = if maximizing {
        Score::NEG_INFINITY
    } else {
        Score::INFINITY
    };
    for mv in game.legal_moves() {
        let mut child = game.push(&mv);
        let value = minimax(&mut child, depth - 1, !maximizing, leaf)?;
        if maximizing && value > best || !maximizing && value < best {
            best = value;
        }
    }
    Ok(best)
}
