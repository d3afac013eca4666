use shakmaty::Move;

/// Position score on the scale shared by every evaluator.
///
/// Positive favors White. The heuristic evaluator works in
/// centipawn-like units (pawn = 100), the neural evaluator in [-1, 1].
pub type Score = f32;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub score: Score,
    /// `None` at a leaf, or when the searched position has no legal move.
    pub best_move: Option<Move>,
}

impl SearchResult {
    pub fn leaf(score: Score) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: Score,
}

#[derive(Debug, Clone)]
pub struct MoveProbability {
    pub mv: Move,
    pub probability: f64,
}
