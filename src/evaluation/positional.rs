//! Light positional heuristics on top of material: advanced pawns, centralized
//! minor pieces and a king kept away from the center.
//!
//! The bonuses are an order of magnitude smaller than material values (tens of
//! centipawns), so they only break ties between materially equal positions.

use crate::chess::core::{Piece, PieceKind, Player, Square};
use crate::evaluation::Score;

/// Manhattan distance from the square to the center of the board (3.5, 3.5).
/// Both terms are odd multiples of one half, so the sum is always a whole
/// number within 1..=7.
const fn center_distance(square: Square) -> i32 {
    let row = 2 * square.row() as i32 - 7;
    let col = 2 * square.col() as i32 - 7;
    (row.abs() + col.abs()) / 2
}

/// Bonus of the piece standing on given square, from the piece owner's
/// perspective.
#[must_use]
pub const fn positional_bonus(piece: Piece, square: Square) -> Score {
    let row = square.row() as i32;
    match piece.kind {
        // Reward advancement towards the opponent's back rank.
        PieceKind::Pawn => match piece.owner {
            Player::White => Score::cp((6 - row) * 10),
            Player::Black => Score::cp((row - 1) * 10),
        },
        PieceKind::Knight | PieceKind::Bishop => Score::cp((7 - center_distance(square)) * 10),
        PieceKind::King => Score::cp(center_distance(square) * 5),
        PieceKind::Rook | PieceKind::Queen => Score::cp(0),
    }
}
