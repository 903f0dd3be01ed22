//! Provides a very basic implementation of evaluation based on material
//! advantage using "[standard piece valuations]".
//!
//! While not very useful on its own, this evaluation is stable (fixed piece
//! "values"), easy to understand and deterministic, which makes it great for
//! testing search.
//!
//! [standard piece valuations]: https://en.wikipedia.org/wiki/Chess_piece_relative_value

use crate::chess::board::Board;
use crate::chess::core::{PieceKind, Player};
use crate::evaluation::Score;

const PAWN_VALUE: Score = Score::cp(100);
const KNIGHT_VALUE: Score = Score::cp(300);
const BISHOP_VALUE: Score = Score::cp(300);
const ROOK_VALUE: Score = Score::cp(500);
const QUEEN_VALUE: Score = Score::cp(900);
// Kings are never traded, so they do not contribute to the balance.
const KING_VALUE: Score = Score::cp(0);

/// Material value of a single piece.
#[must_use]
pub const fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Difference between the player's and the opponent's material.
#[must_use]
pub fn material_advantage(board: &Board, player: Player) -> Score {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece_value(piece.kind);
            if piece.owner == player {
                value
            } else {
                -value
            }
        })
        .sum()
}
