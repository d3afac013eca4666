use ndarray::{Array3, Array4, ArrayViewMut3, Axis};
use shakmaty::{Board, Role, Square};

/// Shape of a single encoded position: `[rank, file, channel]`.
pub const ENCODED_SHAPE: [usize; 3] = [8, 8, 12];

/// One-hot piece planes for one position, shape [`ENCODED_SHAPE`].
///
/// - row `r` is rank `r + 1`, column `f` is file `a + f`;
/// - channels `0..6` hold White pieces and `6..12` Black pieces, each
///   block ordered pawn, knight, bishop, rook, queen, king.
///
/// The scoring model was trained against exactly this layout. Unlike
/// the channels-first tensors some models use, the piece channel is the
/// last axis here.
pub type EncodedPosition = Array3<f32>;

pub fn encode(board: &Board) -> EncodedPosition {
    let mut tensor = Array3::<f32>::zeros(ENCODED_SHAPE);
    board_to_tensor(board, tensor.view_mut());
    tensor
}

/// Encode several boards into a `[B, 8, 8, 12]` batch.
pub fn encode_batch<'a>(boards: impl IntoIterator<Item = &'a Board>) -> Array4<f32> {
    let boards: Vec<&Board> = boards.into_iter().collect();
    let [rows, cols, channels] = ENCODED_SHAPE;
    let mut batch = Array4::<f32>::zeros((boards.len(), rows, cols, channels));
    for (i, board) in boards.into_iter().enumerate() {
        board_to_tensor(board, batch.index_axis_mut(Axis(0), i));
    }
    batch
}

pub fn channel(piece: shakmaty::Piece) -> usize {
    let color_offset = if piece.color.is_white() { 0 } else { 6 };
    let role_offset = match piece.role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    };
    color_offset + role_offset
}

fn board_to_tensor(board: &Board, mut tensor: ArrayViewMut3<f32>) {
    for sq in Square::ALL {
        if let Some(piece) = board.piece_at(sq) {
            tensor[[sq.rank() as usize, sq.file() as usize, channel(piece)]] = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Game;
    use shakmaty::Position;

    fn occupied_squares(board: &Board) -> usize {
        board.occupied().count()
    }

    #[test]
    fn start_position_planes() {
        let game = Game::default();
        let tensor = encode(game.position().board());

        assert_eq!(tensor.shape(), &ENCODED_SHAPE);
        // a1 white rook, e1 white king, e8 black king, d7 black pawn
        assert_eq!(tensor[[0, 0, 3]], 1.0);
        assert_eq!(tensor[[0, 4, 5]], 1.0);
        assert_eq!(tensor[[7, 4, 11]], 1.0);
        assert_eq!(tensor[[6, 3, 6]], 1.0);
        assert_eq!(tensor[[1, 1, 0]], 1.0);
        assert_eq!(tensor[[0, 6, 1]], 1.0);
        assert_eq!(tensor[[7, 2, 8]], 1.0);
        assert_eq!(tensor[[7, 3, 10]], 1.0);
    }

    #[test]
    fn encoding_conserves_occupancy() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
            "4k3/8/8/8/8/8/4Q3/K7 b - - 0 1",
        ];
        for fen in fens {
            let game = Game::from_fen(fen).unwrap();
            let board = game.position().board();
            let tensor = encode(board);

            assert_eq!(tensor.sum() as usize, occupied_squares(board), "{fen}");
            for sq in Square::ALL {
                let planes = tensor.slice(ndarray::s![sq.rank() as usize, sq.file() as usize, ..]);
                let set = planes.iter().filter(|&&v| v == 1.0).count();
                let zeros = planes.iter().filter(|&&v| v == 0.0).count();
                assert_eq!(zeros + set, 12);
                match board.piece_at(sq) {
                    Some(piece) => {
                        assert_eq!(set, 1, "{fen} {sq}");
                        assert_eq!(planes[channel(piece)], 1.0);
                    }
                    None => assert_eq!(set, 0, "{fen} {sq}"),
                }
            }
        }
    }

    #[test]
    fn batch_stacks_single_encodings() {
        let start = Game::default();
        let other = Game::from_fen("4k3/8/8/8/8/8/4Q3/K7 b - - 0 1").unwrap();
        let batch = encode_batch([start.position().board(), other.position().board()]);

        assert_eq!(batch.shape(), &[2, 8, 8, 12]);
        assert_eq!(batch.index_axis(Axis(0), 0), encode(start.position().board()));
        assert_eq!(batch.index_axis(Axis(0), 1), encode(other.position().board()));
    }
}
