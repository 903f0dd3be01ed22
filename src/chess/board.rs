//! Square-centric [`Board`] representation: an 8x8 grid of optional pieces.
//!
//! The board is a plain value. It is [`Copy`], so simulating a move during the
//! search or checkmate detection is just a copy followed by
//! [`Board::make_move`]: branches never share cells and backtracking never
//! needs an explicit "unmake".

use std::fmt::{self, Write};

use anyhow::{bail, Context};

use crate::chess::core::{Move, Piece, PieceKind, Player, Square, BOARD_WIDTH};

const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement on the board. Row 0 is Black's back rank (rank 8).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
        }
    }

    /// Creates the standard starting setup.
    ///
    /// ```
    /// use chessmaster::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            let backrank = player.backrank_row() as usize;
            let pawns = player.pawns_starting_row() as usize;
            for (col, kind) in BACKRANK.into_iter().enumerate() {
                board.cells[backrank][col] = Some(Piece::new(player, kind));
                board.cells[pawns][col] = Some(Piece::new(player, PieceKind::Pawn));
            }
        }
        board
    }

    /// Parses the piece placement field of [Forsyth-Edwards Notation]: ranks
    /// from 8 to 1 separated by `/`, digits for runs of empty squares.
    ///
    /// # Errors
    ///
    /// If the input is malformed or the placement is impossible (more than one
    /// king, more than eight pawns or more than sixteen pieces of one player).
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(placement: &str) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let mut row: u8 = 0;
        for rank in placement.split('/') {
            if row == BOARD_WIDTH {
                bail!("incorrect placement: expected 8 ranks, got '{placement}'");
            }
            let mut col: u8 = 0;
            for symbol in rank.chars() {
                if col >= BOARD_WIDTH {
                    bail!("incorrect placement: rank '{rank}' is longer than {BOARD_WIDTH}");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        col += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)
                    .with_context(|| format!("incorrect placement: rank '{rank}'"))?;
                result.cells[row as usize][col as usize] = Some(piece);
                col += 1;
            }
            if col != BOARD_WIDTH {
                bail!(
                    "incorrect placement: rank size should be exactly {BOARD_WIDTH}, got '{rank}' \
                     of length {col}"
                );
            }
            row += 1;
        }
        if row != BOARD_WIDTH {
            bail!("incorrect placement: there should be 8 ranks, got '{placement}'");
        }
        result.validate()?;
        Ok(result)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for player in [Player::White, Player::Black] {
            let count = |kind: Option<PieceKind>| {
                self.pieces()
                    .filter(|(_, piece)| {
                        piece.owner == player && kind.map_or(true, |kind| piece.kind == kind)
                    })
                    .count()
            };
            let kings = count(Some(PieceKind::King));
            if kings > 1 {
                bail!("expected at most 1 {player} king, got {kings}");
            }
            let pawns = count(Some(PieceKind::Pawn));
            if pawns > BOARD_WIDTH as usize {
                bail!("expected <= 8 {player} pawns, got {pawns}");
            }
            let pieces = count(None);
            if pieces > 2 * BOARD_WIDTH as usize {
                bail!("expected <= 16 {player} pieces, got {pieces}");
            }
        }
        Ok(())
    }

    /// Returns the piece on given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    /// Puts a piece on the square (or clears it with `None`).
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row() as usize][square.col() as usize] = piece;
    }

    /// Moves whatever is on `from` to `to` and returns the piece previously
    /// occupying `to`. No legality checks are performed.
    pub fn make_move(&mut self, next_move: Move) -> Option<Piece> {
        let piece = self.at(next_move.from());
        let captured = self.at(next_move.to());
        self.set(next_move.to(), piece);
        self.set(next_move.from(), None);
        captured
    }

    /// Returns a copy of the board with the move applied, leaving `self`
    /// untouched.
    #[must_use]
    pub fn with_move(&self, next_move: Move) -> Self {
        let mut board = *self;
        let _ = board.make_move(next_move);
        board
    }

    /// Finds the king of given player, scanning in row-major order. A board
    /// without the king is tolerated and yields `None`.
    #[must_use]
    pub fn king_square(&self, player: Player) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.owner == player && piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    /// Parses the placement after trimming surrounding whitespace.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_placement(input.trim())
    }
}

impl fmt::Display for Board {
    /// Writes the FEN piece placement.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            let mut empty = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty != 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{piece}")?;
                    },
                    None => empty += 1,
                }
            }
            if empty != 0 {
                write!(f, "{empty}")?;
            }
            if row + 1 != BOARD_WIDTH as usize {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) with rank numbers and file letters on the side.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{}", BOARD_WIDTH as usize - row)?;
            for cell in cells {
                f.write_char(SQUARE_SEPARATOR)?;
                match cell {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
            }
            f.write_char(LINE_SEPARATOR)?;
        }
        f.write_str("  a b c d e f g h")
    }
}

const LINE_SEPARATOR: char = '\n';
const SQUARE_SEPARATOR: char = ' ';
