//! Static position evaluation.
//!
//! Every [`Evaluator`] reports White-relative scores. Callers that need
//! "good for me" ask for [`Evaluator::evaluate_for`] or flip the search
//! direction; the evaluators themselves never know who is asking.

use shakmaty::{Board, Chess, Color, Piece, Position, Role, Square};

use crate::{
    error::EngineError,
    rules::{attackers, king_square, square_distance},
    types::Score,
};

pub trait Evaluator {
    /// Score `position` from White's point of view.
    fn evaluate(&mut self, position: &Chess) -> Result<Score, EngineError>;

    /// Score `position` from `perspective`'s point of view.
    fn evaluate_for(&mut self, position: &Chess, perspective: Color) -> Result<Score, EngineError> {
        let score = self.evaluate(position)?;
        Ok(perspective.fold_wb(score, -score))
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&mut self, position: &Chess) -> Result<Score, EngineError> {
        (**self).evaluate(position)
    }

    fn evaluate_for(&mut self, position: &Chess, perspective: Color) -> Result<Score, EngineError> {
        (**self).evaluate_for(position, perspective)
    }
}

pub const CENTER_SQUARES: [Square; 4] = [Square::E4, Square::E5, Square::D4, Square::D5];

const CENTER_BONUS: i32 = 10;
const DEVELOPMENT_BONUS: i32 = 10;
const PROTECTED_CHECK_BONUS: i32 = 30;
const UNPROTECTED_CHECK_PENALTY: i32 = 20;
const KING_PRESSURE_PENALTY: i32 = 5;
const KING_ZONE_RADIUS: u32 = 2;

/// Minor pieces on their home squares. A square earns the development
/// bonus whenever it no longer holds this exact piece, whether the piece
/// moved away or was captured there.
const HOME_MINORS: [(Square, Piece); 8] = [
    (Square::B1, Piece { color: Color::White, role: Role::Knight }),
    (Square::G1, Piece { color: Color::White, role: Role::Knight }),
    (Square::C1, Piece { color: Color::White, role: Role::Bishop }),
    (Square::F1, Piece { color: Color::White, role: Role::Bishop }),
    (Square::B8, Piece { color: Color::Black, role: Role::Knight }),
    (Square::G8, Piece { color: Color::Black, role: Role::Knight }),
    (Square::C8, Piece { color: Color::Black, role: Role::Bishop }),
    (Square::F8, Piece { color: Color::Black, role: Role::Bishop }),
];

pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 320,
        Role::Bishop => 330,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 20000,
    }
}

fn signed(color: Color, value: i32) -> i32 {
    color.fold_wb(value, -value)
}

pub fn material(board: &Board) -> i32 {
    Square::ALL
        .into_iter()
        .filter_map(|sq| board.piece_at(sq))
        .map(|piece| signed(piece.color, piece_value(piece.role)))
        .sum()
}

pub fn center_control(board: &Board) -> i32 {
    CENTER_SQUARES
        .into_iter()
        .filter_map(|sq| board.piece_at(sq))
        .map(|piece| signed(piece.color, CENTER_BONUS))
        .sum()
}

pub fn development(board: &Board) -> i32 {
    HOME_MINORS
        .into_iter()
        .filter(|&(sq, home)| board.piece_at(sq) != Some(home))
        .map(|(_, home)| signed(home.color, DEVELOPMENT_BONUS))
        .sum()
}

/// Rewards checks delivered by defended pieces and penalizes loose ones.
///
/// A checker counts as protected only with two or more defenders. Move
/// ordering uses a looser one-defender rule; the two are independent.
pub fn check_safety(position: &Chess) -> i32 {
    if !position.is_check() {
        return 0;
    }
    let checked = position.turn();
    let checking = !checked;
    let Some(king) = king_square(position, checked) else {
        return 0;
    };

    attackers(position, checking, king)
        .into_iter()
        .map(|checker| {
            let defenders = attackers(position, checking, checker).count();
            if defenders > 1 {
                signed(checking, PROTECTED_CHECK_BONUS)
            } else {
                signed(checking, -UNPROTECTED_CHECK_PENALTY)
            }
        })
        .sum()
}

fn enemies_near_king(board: &Board, color: Color) -> i32 {
    let Some(king) = board.king_of(color) else {
        return 0;
    };
    board
        .by_color(!color)
        .into_iter()
        .filter(|&sq| square_distance(sq, king) <= KING_ZONE_RADIUS)
        .count() as i32
}

pub fn king_safety(board: &Board) -> i32 {
    KING_PRESSURE_PENALTY
        * (enemies_near_king(board, Color::Black) - enemies_near_king(board, Color::White))
}

/// Hand-crafted evaluation: material, center occupation, minor-piece
/// development, check safety and king-zone pressure, summed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    pub fn score(position: &Chess) -> i32 {
        let board = position.board();
        material(board)
            + center_control(board)
            + development(board)
            + check_safety(position)
            + king_safety(board)
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&mut self, position: &Chess) -> Result<Score, EngineError> {
        Ok(Self::score(position) as Score)
    }
}
