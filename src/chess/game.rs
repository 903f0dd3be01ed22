//! A game in progress: the board together with everything needed to continue,
//! review and take back the play.

use std::fmt;

use rand::Rng;
use tracing::info;

use crate::chess::board::Board;
use crate::chess::core::{Move, Piece, Player, Square};
use crate::chess::rules::{self, Destinations, Status};
use crate::search::{self, Difficulty};

/// Who is playing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Both sides are controlled by the user.
    #[default]
    TwoPlayer,
    /// One side is controlled by the search.
    Computer {
        /// Strength of the computer opponent.
        difficulty: Difficulty,
        /// The side played by the computer.
        computer: Player,
    },
}

bitflags::bitflags! {
    /// What happened as a result of a played move.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveAttributes: u8 {
        /// An opponent's piece was removed from the board.
        const CAPTURE = 0b001;
        /// The opponent's king is attacked after the move.
        const CHECK = 0b010;
        /// The opponent is checkmated.
        const CHECKMATE = 0b100;
    }
}

/// Entry of the game history. Holds enough information to take the move
/// back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// The move itself.
    pub played: Move,
    /// The piece that moved.
    pub piece: Piece,
    /// The piece that stood on the destination square, if any.
    pub captured: Option<Piece>,
    #[allow(missing_docs)]
    pub attributes: MoveAttributes,
}

impl fmt::Display for MoveRecord {
    /// Dumps the move as `e2-e4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.played.from(), self.played.to())
    }
}

/// Current position, side to move, history and status of a single game.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,
    mode: Mode,
    history: Vec<MoveRecord>,
    captured: Vec<Piece>,
    move_count: u32,
    status: Status,
}

impl Game {
    /// Starts a game from the starting position with white to move.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self::from_board(Board::starting(), Player::White, mode)
    }

    /// Starts a game from an arbitrary board.
    #[must_use]
    pub fn from_board(board: Board, side_to_move: Player, mode: Mode) -> Self {
        Self {
            board,
            side_to_move,
            mode,
            history: Vec::new(),
            captured: Vec::new(),
            move_count: 0,
            status: rules::status(&board, side_to_move),
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Played moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Captured pieces of both sides in the order they were taken.
    #[must_use]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Number of moves (plies) played so far.
    #[must_use]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Status of the position for the side to move.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns `true` if the computer is supposed to make the next move.
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        !self.is_over()
            && matches!(self.mode, Mode::Computer { computer, .. } if computer == self.side_to_move)
    }

    /// Squares the piece on `square` can move to. Empty unless the piece
    /// belongs to the side to move.
    #[must_use]
    pub fn destinations(&self, square: Square) -> Destinations {
        match self.board.at(square) {
            Some(piece) if piece.owner == self.side_to_move => {
                rules::destinations(&self.board, square)
            },
            _ => Destinations::new(),
        }
    }

    /// Plays the move for the side to move.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is already over, if there is no piece of
    /// the side to move on the source square or if the move breaks the rules.
    pub fn play(&mut self, next_move: Move) -> anyhow::Result<&MoveRecord> {
        if self.is_over() {
            anyhow::bail!("the game is over ({}), can not play {next_move}", self.status);
        }
        let piece = match self.board.at(next_move.from()) {
            None => anyhow::bail!("no piece on {}", next_move.from()),
            Some(piece) if piece.owner != self.side_to_move => anyhow::bail!(
                "piece on {} belongs to {}, but it is {} to move",
                next_move.from(),
                piece.owner,
                self.side_to_move
            ),
            Some(piece) => piece,
        };
        if !rules::is_valid_move(&self.board, next_move.from(), next_move.to()) {
            anyhow::bail!("illegal move: {next_move}");
        }

        let captured = self.board.make_move(next_move);
        if let Some(captured) = captured {
            self.captured.push(captured);
        }
        self.side_to_move = !self.side_to_move;
        self.move_count += 1;
        self.status = rules::status(&self.board, self.side_to_move);

        let mut attributes = MoveAttributes::empty();
        attributes.set(MoveAttributes::CAPTURE, captured.is_some());
        attributes.set(MoveAttributes::CHECK, self.status.in_check);
        attributes.set(
            MoveAttributes::CHECKMATE,
            matches!(self.status.outcome, Some(rules::Outcome::Checkmate { .. })),
        );
        let record = MoveRecord {
            played: next_move,
            piece,
            captured,
            attributes,
        };
        info!(%record, player = %piece.owner, status = %self.status, "played");
        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Lets the computer play for the side to move.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not played against the computer or it
    /// is not the computer's turn. `Ok(None)` means the computer has no moves.
    pub fn play_computer(&mut self) -> anyhow::Result<Option<MoveRecord>> {
        self.play_computer_with_rng(&mut rand::thread_rng())
    }

    /// Same as [`Game::play_computer`] with an explicit source of randomness.
    ///
    /// # Errors
    ///
    /// See [`Game::play_computer`].
    pub fn play_computer_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> anyhow::Result<Option<MoveRecord>> {
        let Mode::Computer { difficulty, .. } = self.mode else {
            anyhow::bail!("no computer opponent in a two player game");
        };
        if !self.is_computer_turn() {
            anyhow::bail!("it is not the computer's turn");
        }
        self.play_as_computer(difficulty, rng)
    }

    /// Searches and plays a move for the side to move regardless of the mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is already over.
    pub fn play_as_computer<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> anyhow::Result<Option<MoveRecord>> {
        if self.is_over() {
            anyhow::bail!("the game is over ({})", self.status);
        }
        match search::select_move_with_rng(&self.board, self.side_to_move, difficulty, rng) {
            Some(next_move) => self.play(next_move).map(|record| Some(*record)),
            None => Ok(None),
        }
    }

    /// Takes back the last move. Returns `None` if nothing was played.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        self.board.set(record.played.from(), Some(record.piece));
        self.board.set(record.played.to(), record.captured);
        if record.captured.is_some() {
            let _ = self.captured.pop();
        }
        self.side_to_move = !self.side_to_move;
        self.move_count -= 1;
        self.status = rules::status(&self.board, self.side_to_move);
        info!(%record, "undone");
        Some(record)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::chess::core::PieceKind;
    use crate::chess::rules::Outcome;

    fn mv(uci: &str) -> Move {
        Move::from_uci(uci).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::default();
        assert_eq!(game.board(), &Board::starting());
        assert_eq!(game.side_to_move(), Player::White);
        assert_eq!(game.mode(), Mode::TwoPlayer);
        assert_eq!(game.move_count(), 0);
        assert!(game.history().is_empty());
        assert!(!game.is_over());
        assert_eq!(game.status().to_string(), "in progress");
    }

    #[test]
    fn play_and_record() {
        let mut game = Game::default();
        let record = *game.play(mv("e2e4")).unwrap();
        assert_eq!(record.to_string(), "e2-e4");
        assert_eq!(record.piece, Piece::new(Player::White, PieceKind::Pawn));
        assert_eq!(record.captured, None);
        assert_eq!(record.attributes, MoveAttributes::empty());
        assert_eq!(game.side_to_move(), Player::Black);
        assert_eq!(game.move_count(), 1);
        assert_eq!(
            game.board().to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
        );
    }

    #[test]
    fn rejected_moves() {
        let mut game = Game::default();
        assert_eq!(
            game.play(mv("e4e5")).unwrap_err().to_string(),
            "no piece on e4"
        );
        assert_eq!(
            game.play(mv("e7e5")).unwrap_err().to_string(),
            "piece on e7 belongs to black, but it is white to move"
        );
        assert_eq!(
            game.play(mv("e2e5")).unwrap_err().to_string(),
            "illegal move: e2e5"
        );
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.board(), &Board::starting());
    }

    #[test]
    fn capture_and_undo() {
        let mut game = Game::default();
        for uci in ["e2e4", "d7d5"] {
            let _ = game.play(mv(uci)).unwrap();
        }
        let before = *game.board();
        let record = *game.play(mv("e4d5")).unwrap();
        assert!(record.attributes.contains(MoveAttributes::CAPTURE));
        assert_eq!(record.captured, Some(Piece::new(Player::Black, PieceKind::Pawn)));
        assert_eq!(game.captured(), &[Piece::new(Player::Black, PieceKind::Pawn)]);

        assert_eq!(game.undo(), Some(record));
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Player::White);
        assert_eq!(game.move_count(), 2);
        assert!(game.captured().is_empty());
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn undo_without_history() {
        let mut game = Game::default();
        assert_eq!(game.undo(), None);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn checkmate_ends_the_game() {
        // Black rook delivers the back rank mate from a2.
        let board = Board::from_placement("6k1/8/8/8/8/8/r4PPP/7K").unwrap();
        let mut game = Game::from_board(board, Player::Black, Mode::TwoPlayer);
        let record = *game.play(mv("a2a1")).unwrap();
        assert!(record
            .attributes
            .contains(MoveAttributes::CHECK | MoveAttributes::CHECKMATE));
        assert!(game.is_over());
        assert_eq!(
            game.status().outcome,
            Some(Outcome::Checkmate {
                winner: Player::Black
            })
        );
        assert_eq!(game.status().to_string(), "checkmate, black wins");
        assert_eq!(
            game.play(mv("h1g1")).unwrap_err().to_string(),
            "the game is over (checkmate, black wins), can not play h1g1"
        );

        let _ = game.undo().unwrap();
        assert!(!game.is_over());
        assert_eq!(game.side_to_move(), Player::Black);
    }

    #[test]
    fn destinations_of_the_side_to_move() {
        let game = Game::default();
        let square = |s| Square::try_from(s).unwrap();
        assert_eq!(
            game.destinations(square("g1")).as_slice(),
            &[square("f3"), square("h3")]
        );
        assert!(game.destinations(square("g8")).is_empty());
        assert!(game.destinations(square("e4")).is_empty());
    }

    #[test]
    fn computer_replies() {
        let mode = Mode::Computer {
            difficulty: Difficulty::Medium,
            computer: Player::Black,
        };
        let mut game = Game::new(mode);
        assert!(!game.is_computer_turn());
        assert!(game.play_computer().is_err());

        let _ = game.play(mv("e2e4")).unwrap();
        assert!(game.is_computer_turn());
        let reply = game.play_computer().unwrap().unwrap();
        assert_eq!(reply.piece.owner, Player::Black);
        assert_eq!(game.side_to_move(), Player::White);
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn easy_computer_is_reproducible() {
        let mode = Mode::Computer {
            difficulty: Difficulty::Easy,
            computer: Player::White,
        };
        let mut first = Game::new(mode);
        let mut second = Game::new(mode);
        let first_move = first
            .play_computer_with_rng(&mut StdRng::seed_from_u64(1))
            .unwrap();
        let second_move = second
            .play_computer_with_rng(&mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(first_move, second_move);
        assert!(first_move.is_some());
    }

    #[test]
    fn two_player_game_has_no_computer() {
        let mut game = Game::default();
        assert_eq!(
            game.play_computer().unwrap_err().to_string(),
            "no computer opponent in a two player game"
        );
    }
}
