//! Move ordering for alpha-beta.
//!
//! Moves are bucketed and the buckets concatenated; inside a bucket the
//! generator's order is kept. Checks whose landing square is undefended
//! go to the very end, behind quiet moves, so the search does not chase
//! unsound sacrificial checks first.

use shakmaty::Move;

use crate::rules::{Game, attackers, landing_square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveBucket {
    Promotion,
    Capture,
    ProtectedCheck,
    Other,
    UnprotectedCheck,
}

const BUCKET_COUNT: usize = 5;

/// Classify `mv`, which must be legal in `game`.
pub fn classify(game: &mut Game, mv: &Move) -> MoveBucket {
    if mv.promotion().is_some() {
        return MoveBucket::Promotion;
    }
    if mv.is_capture() {
        return MoveBucket::Capture;
    }

    let mover = game.side_to_move();
    let child = game.push(mv);
    if !child.is_check() {
        return MoveBucket::Other;
    }
    // Any single defender of the landing square is enough here, unlike
    // the evaluator's check-safety term.
    let defenders = attackers(child.position(), mover, landing_square(mv));
    if defenders.any() {
        MoveBucket::ProtectedCheck
    } else {
        MoveBucket::UnprotectedCheck
    }
}

pub fn order_moves(game: &mut Game, moves: impl IntoIterator<Item = Move>) -> Vec<Move> {
    let mut buckets: [Vec<Move>; BUCKET_COUNT] = Default::default();
    for mv in moves {
        let bucket = classify(game, &mv);
        buckets[bucket as usize].push(mv);
    }
    buckets.into_iter().flatten().collect()
}

/// Legal moves of the current position, ordered.
pub fn ordered_legal_moves(game: &mut Game) -> Vec<Move> {
    let moves = game.legal_moves();
    order_moves(game, moves)
}
