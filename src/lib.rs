//! Move selection for chess by adversarial tree search.
//!
//!
//! An [`Agent`] is bound to a color, a search depth and one of two
//! evaluators:
//!
//! - the [`HeuristicEvaluator`] (material, center, development, check
//!   safety, king pressure) drives a deterministic alpha-beta search;
//! - the [`NeuralEvaluator`], fed by the `[8, 8, 12]` board encoding in
//!   [`tensor`], drives a sampled policy: every root move gets a
//!   full-width rollout and one move is drawn from a temperature softmax
//!   over the rollout scores.
//!
//! Game rules come from `shakmaty`, wrapped by [`Game`] so the search can
//! make and unmake moves with a scoped guard. Scores are always
//! White-relative; an agent playing Black inverts them where it decides.
//!
//! The library re-exports `shakmaty` to make position construction easy.

mod agent;
mod config;
mod error;
mod evaluate;
mod neural;
mod ordering;
mod rules;
mod search;
mod stochastic;
pub mod tensor;
mod types;

/// Move-choosing façade.
pub use agent::{Agent, Policy};

/// Agent configuration.
pub use config::{AgentConfig, EvaluatorKind, Side};

/// Error type produced by library operations.
pub use error::EngineError;

/// Position scoring.
pub use evaluate::{
    Evaluator, HeuristicEvaluator, center_control, check_safety, development, king_safety,
    material, piece_value,
};
pub use neural::{Backend, NeuralEvaluator, OnnxModel, ScalarModel, check_input_shape};

/// Search building blocks.
pub use ordering::{MoveBucket, classify, order_moves, ordered_legal_moves};
pub use rules::{
    Game, MoveGuard, attackers, king_square, landing_square, piece_at, square_distance,
};
pub use search::{Search, SearchStats, minimax};
pub use stochastic::{
    StochasticSelector, choose_stochastic, rollout_score, softmax, temperature,
};

/// Result data structures.
pub use types::{MoveProbability, Score, ScoredMove, SearchResult};

/// Re-export of `shakmaty` for convenience when building positions.
pub use shakmaty;
