//! Thin adapter over `shakmaty` exposing the rules queries the search
//! needs, plus stack-disciplined make/unmake.
//!
//! `shakmaty::Chess` has no undo, so [`Game`] keeps a history of the
//! positions it replaced. [`Game::push`] hands back a [`MoveGuard`] that
//! restores the previous position when dropped, which makes every exit
//! path of a recursive search (pruning break, `?` on an evaluator error)
//! pop exactly once.

use std::ops::{Deref, DerefMut};

use shakmaty::{
    Bitboard, CastlingMode, Chess, Color, Move, MoveList, Piece, Position, Setup, Square,
    fen::Fen,
};

use crate::error::EngineError;

#[derive(Debug, Clone, Default)]
pub struct Game {
    position: Chess,
    history: Vec<Chess>,
}

impl Game {
    pub fn new(position: Chess) -> Self {
        Self {
            position,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let fen: Fen = fen.parse()?;
        let setup: Setup = fen.into();
        let position: Chess = setup.position(CastlingMode::Standard)?;
        Ok(Self::new(position))
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    pub fn is_terminal(&self) -> bool {
        self.position.is_game_over()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    /// Number of pushes not yet popped.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Plays `mv` until the returned guard is dropped.
    ///
    /// `mv` must be legal in the current position.
    pub fn push(&mut self, mv: &Move) -> MoveGuard<'_> {
        let next = {
            let mut next = self.position.clone();
            next.play_unchecked(mv.clone());
            next
        };
        self.history.push(std::mem::replace(&mut self.position, next));
        MoveGuard { game: self }
    }

    fn pop(&mut self) {
        // A pop without a matching push means the position can no longer
        // be trusted; there is nothing sensible to recover to.
        let previous = self
            .history
            .pop()
            .expect("pop without matching push: position state corrupted");
        self.position = previous;
    }
}

impl From<Chess> for Game {
    fn from(position: Chess) -> Self {
        Self::new(position)
    }
}

/// Scoped make/unmake. Derefs to the [`Game`] with the move applied.
pub struct MoveGuard<'a> {
    game: &'a mut Game,
}

impl Deref for MoveGuard<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.game.pop();
    }
}

/// Squares holding a `color` piece that attacks `square`.
pub fn attackers(position: &Chess, color: Color, square: Square) -> Bitboard {
    let board = position.board();
    board.attacks_to(square, color, board.occupied())
}

pub fn king_square(position: &Chess, color: Color) -> Option<Square> {
    position.board().king_of(color)
}

pub fn piece_at(position: &Chess, square: Square) -> Option<Piece> {
    position.board().piece_at(square)
}

/// Chebyshev (king-move) distance.
pub fn square_distance(a: Square, b: Square) -> u32 {
    a.distance(b)
}

/// Square the moving piece stands on after `mv`. For castling this is
/// the king's destination rather than the rook square `shakmaty` uses.
pub fn landing_square(mv: &Move) -> Square {
    match mv.to_uci(CastlingMode::Standard) {
        shakmaty::uci::UciMove::Normal { to, .. } => to,
        _ => mv.to(),
    }
}
