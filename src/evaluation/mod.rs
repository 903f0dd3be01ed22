//! This module implements "static" [evaluation], i.e. predicting the relative
//! value/score of given position without [`crate::search`].
//!
//! The score is returned in centipawn units from the perspective of the given
//! player: positive values are good for them.
//!
//! [evaluation]: https://www.chessprogramming.org/Evaluation

use crate::chess::board::Board;
use crate::chess::core::Player;

pub mod material;
pub mod positional;
mod score;

pub use score::Score;

/// Sums material and positional bonus of every piece on the board, counting
/// the player's pieces positively and the opponent's pieces negatively.
///
/// ```
/// use chessmaster::chess::board::Board;
/// use chessmaster::chess::core::Player;
/// use chessmaster::evaluation::{evaluate, Score};
///
/// assert_eq!(evaluate(&Board::starting(), Player::White), Score::cp(0));
/// ```
#[must_use]
pub fn evaluate(board: &Board, player: Player) -> Score {
    board
        .pieces()
        .map(|(square, piece)| {
            let value =
                material::piece_value(piece.kind) + positional::positional_bonus(piece, square);
            if piece.owner == player {
                value
            } else {
                -value
            }
        })
        .sum()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Move;

    #[test]
    fn symmetric_positions_are_equal() {
        let board = Board::starting();
        assert_eq!(evaluate(&board, Player::White), Score::cp(0));
        assert_eq!(evaluate(&board, Player::Black), Score::cp(0));
    }

    #[test]
    fn perspective_flips_sign() {
        let board = Board::starting().with_move(Move::from_uci("e2e4").unwrap());
        // The pawn advanced two rows.
        assert_eq!(evaluate(&board, Player::White), Score::cp(20));
        assert_eq!(evaluate(&board, Player::Black), Score::cp(-20));
    }

    #[test]
    fn material_and_position() {
        // White: king h1 (35), knight d4 (300 + 60). Black: king a8 (35), rook
        // h8 (500).
        let board = Board::from_placement("k6r/8/8/8/3N4/8/8/7K").unwrap();
        assert_eq!(evaluate(&board, Player::White), Score::cp(35 + 360 - 35 - 500));
        assert_eq!(evaluate(&board, Player::Black), Score::cp(140));
    }
}
