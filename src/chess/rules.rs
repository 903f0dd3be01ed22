//! Movement rules of the pieces and game-end detection.
//!
//! The rule set is deliberately small: there is no castling, en passant or
//! promotion, and move generation is *pseudo-legal*: a move that leaves the
//! mover's own king attacked is still considered valid. The only place where
//! moves are filtered by the resulting check is [`is_checkmate`].

use arrayvec::ArrayVec;
use itertools::iproduct;

use crate::chess::board::Board;
use crate::chess::core::{Move, MoveList, Piece, PieceKind, Player, Square};

/// A single piece never has more than 27 destinations (a queen in the center
/// of an empty board).
pub const MAX_DESTINATIONS: usize = 27;

/// Squares a single piece can move to.
pub type Destinations = ArrayVec<Square, MAX_DESTINATIONS>;

/// Checks whether the piece on `from` can move to `to`.
///
/// The move is rejected when there is no piece on `from`, when `to` holds a
/// piece of the same color or when `from == to`. Otherwise the piece-specific
/// movement rule decides.
///
/// ```
/// use chessmaster::chess::board::Board;
/// use chessmaster::chess::core::Square;
/// use chessmaster::chess::rules::is_valid_move;
///
/// let board = Board::starting();
/// let e2 = Square::try_from("e2").unwrap();
/// assert!(is_valid_move(&board, e2, Square::try_from("e4").unwrap()));
/// assert!(!is_valid_move(&board, e2, Square::try_from("e5").unwrap()));
/// ```
#[must_use]
pub fn is_valid_move(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.at(from) else {
        return false;
    };
    if board.at(to).is_some_and(|target| target.owner == piece.owner) {
        return false;
    }
    if from == to {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => is_valid_pawn_move(board, from, to, piece),
        PieceKind::Rook => is_valid_rook_move(board, from, to),
        PieceKind::Knight => is_valid_knight_move(from, to),
        PieceKind::Bishop => is_valid_bishop_move(board, from, to),
        PieceKind::Queen => {
            is_valid_rook_move(board, from, to) || is_valid_bishop_move(board, from, to)
        },
        PieceKind::King => is_valid_king_move(from, to),
    }
}

/// Signed row and column deltas of the move.
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

fn is_valid_pawn_move(board: &Board, from: Square, to: Square, pawn: Piece) -> bool {
    let direction = pawn.owner.pawn_direction();
    let (row_delta, col_delta) = deltas(from, to);
    match col_delta.abs() {
        0 => {
            if board.at(to).is_some() {
                return false;
            }
            if row_delta == direction {
                return true;
            }
            // Double push: the square in between has to be empty, too.
            row_delta == 2 * direction
                && from.row() == pawn.owner.pawns_starting_row()
                && from
                    .offset(direction, 0)
                    .is_some_and(|intermediate| board.at(intermediate).is_none())
        },
        // Same-color targets are rejected before reaching here.
        1 => row_delta == direction && board.at(to).is_some(),
        _ => false,
    }
}

fn is_valid_rook_move(board: &Board, from: Square, to: Square) -> bool {
    if from.row() != to.row() && from.col() != to.col() {
        return false;
    }
    is_path_clear(board, from, to)
}

fn is_valid_bishop_move(board: &Board, from: Square, to: Square) -> bool {
    let (row_delta, col_delta) = deltas(from, to);
    if row_delta.abs() != col_delta.abs() || row_delta == 0 {
        return false;
    }
    is_path_clear(board, from, to)
}

fn is_valid_knight_move(from: Square, to: Square) -> bool {
    let (row_delta, col_delta) = deltas(from, to);
    matches!(
        (row_delta.abs(), col_delta.abs()),
        (2, 1) | (1, 2)
    )
}

fn is_valid_king_move(from: Square, to: Square) -> bool {
    let (row_delta, col_delta) = deltas(from, to);
    row_delta.abs() <= 1 && col_delta.abs() <= 1
}

/// Checks that all squares strictly between `from` and `to` are empty.
///
/// The walk advances by the sign of each delta, so it is only meaningful for
/// squares on the same row, column or diagonal.
#[must_use]
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (row_delta, col_delta) = deltas(from, to);
    let (row_step, col_step) = (row_delta.signum(), col_delta.signum());
    let mut current = from.offset(row_step, col_step);
    while let Some(square) = current {
        if square == to {
            return true;
        }
        if board.at(square).is_some() {
            return false;
        }
        current = square.offset(row_step, col_step);
    }
    // Walked off the board: `to` is not aligned with `from`.
    false
}

/// Generates all pseudo-legal moves of the player: every `from` square in
/// row-major order and, for each of the player's pieces, every valid `to`
/// square in row-major order.
///
/// The order is stable and is relied upon by the search for tie-breaking.
#[must_use]
pub fn generate_moves(board: &Board, player: Player) -> MoveList {
    iproduct!(Square::iter(), Square::iter())
        .filter(|&(from, to)| {
            board.at(from).is_some_and(|piece| piece.owner == player)
                && is_valid_move(board, from, to)
        })
        .map(|(from, to)| Move::new(from, to))
        .collect()
}

/// Returns all squares the piece on `from` can move to, in row-major order.
/// Empty if there is no piece.
#[must_use]
pub fn destinations(board: &Board, from: Square) -> Destinations {
    Square::iter()
        .filter(|&to| is_valid_move(board, from, to))
        .collect()
}

/// Checks whether any of the opponent's pseudo-legal moves lands on the
/// player's king. A board without the player's king is never in check.
#[must_use]
pub fn is_king_in_check(board: &Board, player: Player) -> bool {
    let Some(king) = board.king_square(player) else {
        return false;
    };
    generate_moves(board, player.opponent())
        .iter()
        .any(|m| m.to() == king)
}

/// The player is in check and every move of theirs still leaves the king in
/// check.
#[must_use]
pub fn is_checkmate(board: &Board, player: Player) -> bool {
    if !is_king_in_check(board, player) {
        return false;
    }
    generate_moves(board, player)
        .into_iter()
        .all(|m| is_king_in_check(&board.with_move(m), player))
}

/// The player is not in check and has no moves at all.
#[must_use]
pub fn is_stalemate(board: &Board, player: Player) -> bool {
    !is_king_in_check(board, player) && generate_moves(board, player).is_empty()
}

/// How the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move is checkmated.
    Checkmate {
        #[allow(missing_docs)]
        winner: Player,
    },
    /// The side to move has no moves and is not in check.
    Stalemate,
}

/// Classification of the position from the perspective of the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Status {
    /// The side to move is in check.
    pub in_check: bool,
    /// `None` while the game goes on.
    pub outcome: Option<Outcome>,
}

impl Status {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            Some(Outcome::Checkmate { winner }) => write!(f, "checkmate, {winner} wins"),
            Some(Outcome::Stalemate) => f.write_str("stalemate"),
            None if self.in_check => f.write_str("check"),
            None => f.write_str("in progress"),
        }
    }
}

/// Classifies the position for the player to move.
#[must_use]
pub fn status(board: &Board, player: Player) -> Status {
    let in_check = is_king_in_check(board, player);
    let outcome = if is_checkmate(board, player) {
        Some(Outcome::Checkmate {
            winner: player.opponent(),
        })
    } else if is_stalemate(board, player) {
        Some(Outcome::Stalemate)
    } else {
        None
    };
    Status { in_check, outcome }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn square(notation: &str) -> Square {
        Square::try_from(notation).unwrap()
    }

    fn board(placement: &str) -> Board {
        Board::from_placement(placement).unwrap()
    }

    fn destinations_of(board: &Board, from: &str) -> Vec<String> {
        destinations(board, square(from))
            .iter()
            .map(Square::to_string)
            .collect()
    }

    #[test]
    fn preconditions() {
        let board = Board::starting();
        // Empty source.
        assert!(!is_valid_move(&board, square("e4"), square("e5")));
        // Same square.
        assert!(!is_valid_move(&board, square("e2"), square("e2")));
        // Same-color destination.
        assert!(!is_valid_move(&board, square("a1"), square("a2")));
        assert!(!is_valid_move(&board, square("d1"), square("e1")));
    }

    #[test]
    fn pawn_pushes() {
        let board = Board::starting();
        assert_eq!(destinations_of(&board, "e2"), vec!["e4", "e3"]);
        assert_eq!(destinations_of(&board, "d7"), vec!["d6", "d5"]);
        // No double push after leaving the starting row.
        let board = board.with_move(Move::from_uci("e2e3").unwrap());
        assert_eq!(destinations_of(&board, "e3"), vec!["e4"]);
    }

    #[test]
    fn pawn_blocked() {
        // Blocked right in front: neither push is possible.
        let blocked = board("8/8/8/8/8/4n3/4P3/8");
        assert!(destinations_of(&blocked, "e2").is_empty());
        // The double push can not jump over the blocker.
        assert!(!is_valid_move(&blocked, square("e2"), square("e4")));
        // Blocked on the destination of the double push.
        let far = board("8/8/8/8/4n3/8/4P3/8");
        assert_eq!(destinations_of(&far, "e2"), vec!["e3"]);
    }

    #[test]
    fn pawn_captures() {
        let board = board("8/8/8/3p1p2/4P3/8/8/8");
        assert_eq!(destinations_of(&board, "e4"), vec!["d5", "e5", "f5"]);
        // Pawns never move backwards or capture backwards.
        assert!(!is_valid_move(&board, square("e4"), square("e3")));
        assert!(!is_valid_move(&board, square("d5"), square("e6")));
        assert!(is_valid_move(&board, square("d5"), square("e4")));
        // Diagonal step onto an empty square is not a move.
        assert!(!is_valid_move(&board, square("e4"), square("d3")));
    }

    #[test]
    fn pawn_on_last_row_is_stuck() {
        // No promotion: a pawn that reached the last row has no moves.
        let board = board("4P3/8/8/8/8/8/8/8");
        assert!(generate_moves(&board, Player::White).is_empty());
    }

    #[test]
    fn knight() {
        let center = board("8/8/8/8/3N4/8/8/8");
        assert_eq!(destinations(&center, square("d4")).len(), 8);
        let corner = board("8/8/8/8/8/8/8/N7");
        assert_eq!(destinations_of(&corner, "a1"), vec!["b3", "c2"]);
        // Knights jump over pieces.
        let surrounded = board("8/8/8/2ppp3/2pNp3/2ppp3/8/8");
        assert_eq!(destinations(&surrounded, square("d4")).len(), 8);
    }

    #[test]
    fn king() {
        let center = board("8/8/8/8/3K4/8/8/8");
        assert_eq!(destinations(&center, square("d4")).len(), 8);
        let corner = board("7k/8/8/8/8/8/8/8");
        assert_eq!(destinations_of(&corner, "h8"), vec!["g8", "g7", "h7"]);
    }

    #[test]
    fn sliders_on_empty_board() {
        assert_eq!(destinations(&board("8/8/8/8/3R4/8/8/8"), square("d4")).len(), 14);
        assert_eq!(destinations(&board("8/8/8/8/3B4/8/8/8"), square("d4")).len(), 13);
        assert_eq!(destinations(&board("8/8/8/8/3Q4/8/8/8"), square("d4")).len(), 27);
    }

    #[test]
    fn sliders_are_blocked() {
        let rook = board("8/8/8/8/R1p4k/8/8/8");
        assert!(is_valid_move(&rook, square("a4"), square("c4")));
        assert!(!is_valid_move(&rook, square("a4"), square("d4")));
        assert!(!is_valid_move(&rook, square("a4"), square("h4")));

        let bishop = board("8/8/8/8/8/2P5/8/B7");
        assert!(!is_valid_move(&bishop, square("a1"), square("d4")));
        assert!(is_valid_move(&bishop, square("a1"), square("b2")));

        let queen = board("8/8/8/8/3p4/8/3Q4/8");
        assert!(is_valid_move(&queen, square("d2"), square("d4")));
        assert!(!is_valid_move(&queen, square("d2"), square("d5")));
        // Not aligned at all.
        assert!(!is_valid_move(&queen, square("d2"), square("e4")));
    }

    #[test]
    fn path_clear() {
        let board = board("8/8/8/8/3p4/8/8/8");
        assert!(is_path_clear(&board, square("a1"), square("c3")));
        assert!(!is_path_clear(&board, square("a1"), square("h8")));
        assert!(!is_path_clear(&board, square("d1"), square("d8")));
        assert!(is_path_clear(&board, square("d1"), square("d4")));
        // Adjacent squares have nothing in between.
        assert!(is_path_clear(&board, square("d3"), square("d4")));
    }

    #[test]
    fn starting_moves_order() {
        let moves: Vec<String> = generate_moves(&Board::starting(), Player::White)
            .iter()
            .map(Move::to_string)
            .collect();
        assert_eq!(
            moves,
            vec![
                "a2a4", "a2a3", "b2b4", "b2b3", "c2c4", "c2c3", "d2d4", "d2d3", "e2e4", "e2e3",
                "f2f4", "f2f3", "g2g4", "g2g3", "h2h4", "h2h3", "b1a3", "b1c3", "g1f3", "g1h3",
            ]
        );
    }

    #[test]
    fn pseudo_legal_moves_keep_king_exposed() {
        // The pinned rook may still leave the e-file.
        let board = board("4r3/8/8/8/8/8/4R3/4K3");
        assert!(is_valid_move(&board, square("e2"), square("a2")));
        assert!(generate_moves(&board, Player::White)
            .contains(&Move::from_uci("e2a2").unwrap()));
    }

    #[test]
    fn check() {
        let open = board("4r2k/8/8/8/8/8/8/4K3");
        assert!(is_king_in_check(&open, Player::White));
        assert!(!is_king_in_check(&open, Player::Black));
        let blocked = board("4r2k/8/8/8/4P3/8/8/4K3");
        assert!(!is_king_in_check(&blocked, Player::White));
    }

    #[test]
    fn kingless_board() {
        let board = board("8/8/8/8/8/8/8/r7");
        assert!(!is_king_in_check(&board, Player::White));
        assert!(!is_checkmate(&board, Player::White));
        // No pieces, no moves, no check.
        assert!(is_stalemate(&board, Player::White));
    }

    #[test]
    fn back_rank_mate() {
        let board = board("6k1/8/8/8/8/8/5PPP/r6K");
        assert!(is_king_in_check(&board, Player::White));
        assert!(is_checkmate(&board, Player::White));
        assert_eq!(
            status(&board, Player::White),
            Status {
                in_check: true,
                outcome: Some(Outcome::Checkmate {
                    winner: Player::Black
                }),
            }
        );
    }

    #[test]
    fn check_with_escape() {
        // The king can step off the back rank.
        let board = board("6k1/8/8/8/8/8/5P1P/r6K");
        assert!(is_king_in_check(&board, Player::White));
        assert!(!is_checkmate(&board, Player::White));
        assert_eq!(status(&board, Player::White).to_string(), "check");
    }

    #[test]
    fn stalemate() {
        // Kings may step onto attacked squares, so the king has to be boxed in
        // by its own immobile pawns.
        let board = board("7K/8/8/8/8/8/pp6/kp6");
        assert!(!is_king_in_check(&board, Player::Black));
        assert!(generate_moves(&board, Player::Black).is_empty());
        assert!(is_stalemate(&board, Player::Black));
        assert!(!is_checkmate(&board, Player::Black));
        assert_eq!(status(&board, Player::Black).to_string(), "stalemate");
    }

    #[test]
    fn starting_status() {
        assert_eq!(status(&Board::starting(), Player::White), Status::default());
        assert_eq!(Status::default().to_string(), "in progress");
    }
}
