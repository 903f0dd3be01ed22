//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;

use anyhow::{bail, Context};
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A plain "from-to" move. It carries no information about the moving piece
/// and it is only meaningful relative to the [`crate::chess::board::Board`] it
/// was generated for: legality is not a property of a [`Move`] alone.
///
/// The textual representation is the same as the UCI long algebraic notation
/// without promotions, e.g. `e2e4`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn from(self) -> Square {
        self.from
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Parses a move in `<from><to>` format, e.g. `e2e4`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly two squares long or if
    /// either of the squares is not valid.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        if input.len() != 4 || !input.is_ascii() {
            bail!("move should be 4 chars long (e.g. e2e4), got '{input}'");
        }
        let (from, to) = input.split_at(2);
        Ok(Self::new(
            Square::try_from(from).with_context(|| format!("source square of '{input}'"))?,
            Square::try_from(to).with_context(|| format!("destination square of '{input}'"))?,
        ))
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_uci(input)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Sequence of moves in generation order. The order matters: search breaks
/// ties in favor of the move generated first.
pub type MoveList = Vec<Move>;

/// Board square addressed by row and column.
///
/// Row 0 is the eighth rank (Black's back rank) and row 7 is the first rank
/// (White's back rank); column 0 is the `a` file:
///
/// ```
/// use chessmaster::chess::core::Square;
///
/// assert_eq!(Square::new(0, 0).to_string(), "a8");
/// assert_eq!(Square::new(7, 4).to_string(), "e1");
/// assert_eq!(Square::try_from("d4").unwrap(), Square::new(4, 3));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square from its row and column.
    ///
    /// # Panics
    ///
    /// Both coordinates have to be within 0..[`BOARD_WIDTH`].
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(
            row < BOARD_WIDTH && col < BOARD_WIDTH,
            "square coordinates should be within 0..BOARD_WIDTH"
        );
        Self { row, col }
    }

    /// Checked version of [`Square::new`].
    ///
    /// # Errors
    ///
    /// If either coordinate is outside 0..[`BOARD_WIDTH`].
    pub fn try_new(row: u8, col: u8) -> anyhow::Result<Self> {
        if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
            bail!("square coordinates should be within 0..BOARD_WIDTH, got ({row}, {col})");
        }
        Ok(Self { row, col })
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// All 64 squares in row-major order: a8, b8, ..., h8, a7, ..., h1.
    pub fn iter() -> impl Iterator<Item = Self> + Clone {
        itertools::iproduct!(0..BOARD_WIDTH, 0..BOARD_WIDTH).map(|(row, col)| Self { row, col })
    }

    /// Returns the square shifted by given deltas or `None` if it would end up
    /// outside of the board.
    #[must_use]
    pub fn offset(self, row_delta: i8, col_delta: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta)?;
        let col = self.col.checked_add_signed(col_delta)?;
        Self::try_new(row, col).ok()
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    /// Parses the algebraic notation of a square, e.g. `e4`.
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got '{square}' with {} chars",
                square.chars().count()
            );
        };
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let row = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Ok(Self { row, col })
    }
}

impl fmt::Display for Square {
    /// Writes the algebraic notation of a square, e.g. `a8` for (0, 0).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + self.col) as char)?;
        f.write_char((b'8' - self.row) as char)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a single pawn push: White moves towards row 0.
    pub(crate) const fn pawn_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row the player's pawns start on and may double-push from.
    pub(crate) const fn pawns_starting_row(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    pub(crate) const fn backrank_row(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("player should be 'white' or 'black', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl TryFrom<char> for PieceKind {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol {
            'k' => Ok(Self::King),
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            'p' => Ok(Self::Pawn),
            _ => bail!("piece kind should be within \"kqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player. Every board cell owns its
/// own copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses FEN piece symbol: uppercase for White, lowercase for Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        match PieceKind::try_from(symbol.to_ascii_lowercase()) {
            Ok(kind) => Ok(Self { owner, kind }),
            Err(_) => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_string();
        match self.owner {
            Player::White => f.write_str(&symbol.to_ascii_uppercase()),
            Player::Black => f.write_str(&symbol),
        }
    }
}
