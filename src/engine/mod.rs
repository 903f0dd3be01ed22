//! The engine puts all pieces together: it keeps the [`Game`] and executes
//! commands of a simple line-based text protocol, one command per line.
//!
//! [`Engine::run`] is the "main loop" of the engine which communicates with
//! the user and executes commands from the input stream.

use std::io::{BufRead, Write};

use itertools::Itertools;
use tracing::{debug, warn};

use crate::chess::core::{Move, Square};
use crate::chess::game::{Game, Mode, MoveRecord};
use crate::chess::rules;
use crate::engine::protocol::{Command, HELP};
use crate::search::Difficulty;

mod protocol;

/// Difficulty used by `go` in a two player game when none is given.
const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Medium;

/// The Engine connects the game, the search and the I/O.
pub struct Engine {
    game: Game,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Mode::TwoPlayer)
    }
}

impl Engine {
    /// Creates a new instance of the engine with a fresh game in the given
    /// mode.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            game: Game::new(mode),
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input is exhausted.
    ///
    /// Malformed commands and illegal moves are reported with an
    /// `info string` line and otherwise ignored. If the computer plays white,
    /// it makes its first move before reading any input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading the input or writing the output fails.
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        self.computer_reply(output)?;
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            debug!(command = line.trim(), "received");
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    warn!(command = line.trim(), error = %e, "rejected");
                    writeln!(output, "info string {e:#}")?;
                    continue;
                },
            };
            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.execute(command, output) {
                warn!(command = line.trim(), error = %e, "failed");
                writeln!(output, "info string {e:#}")?;
            }
            output.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, output: &mut impl Write) -> anyhow::Result<()> {
        match command {
            Command::NewGame { mode } => {
                self.game = Game::new(mode);
                self.computer_reply(output)
            },
            Command::SetPosition {
                board,
                side_to_move,
            } => {
                self.game = Game::from_board(board, side_to_move, Mode::TwoPlayer);
                Ok(())
            },
            Command::Play(next_move) => self.handle_move(next_move, output),
            Command::ListMoves { square } => self.handle_moves(square, output),
            Command::Go { difficulty } => self.handle_go(difficulty, output),
            Command::Undo => self.handle_undo(output),
            Command::Display => {
                writeln!(output, "{:?}", self.game.board())?;
                writeln!(output, "{} to move", self.game.side_to_move())?;
                Ok(())
            },
            Command::Status => {
                writeln!(output, "status: {}", self.game.status())?;
                Ok(())
            },
            Command::Help => {
                writeln!(output, "{HELP}")?;
                Ok(())
            },
            Command::Quit => Ok(()),
        }
    }

    /// Plays the user's move and lets the computer reply.
    fn handle_move(&mut self, next_move: Move, output: &mut impl Write) -> anyhow::Result<()> {
        if self.game.is_computer_turn() {
            anyhow::bail!("it is the computer's turn, use 'go'");
        }
        let record = *self.game.play(next_move)?;
        self.report(&format!("played {record}"), output)?;
        self.computer_reply(output)
    }

    fn handle_moves(&self, square: Option<Square>, output: &mut impl Write) -> anyhow::Result<()> {
        let moves: Vec<Move> = match square {
            Some(square) => self
                .game
                .destinations(square)
                .into_iter()
                .map(|to| Move::new(square, to))
                .collect(),
            None if self.game.is_over() => Vec::new(),
            None => rules::generate_moves(self.game.board(), self.game.side_to_move()),
        };
        if moves.is_empty() {
            writeln!(output, "moves (none)")?;
        } else {
            writeln!(output, "moves {}", moves.iter().join(" "))?;
        }
        Ok(())
    }

    /// Searches and plays a move for the side to move.
    fn handle_go(
        &mut self,
        difficulty: Option<Difficulty>,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        let difficulty = difficulty.unwrap_or(match self.game.mode() {
            Mode::Computer { difficulty, .. } => difficulty,
            Mode::TwoPlayer => DEFAULT_DIFFICULTY,
        });
        let record = self
            .game
            .play_as_computer(difficulty, &mut rand::thread_rng())?;
        self.report_bestmove(record, output)?;
        if record.is_some() {
            self.computer_reply(output)?;
        }
        Ok(())
    }

    /// Takes back the last move. Against the computer, its reply is taken
    /// back too so that it is the user's turn again. If only the computer's
    /// opening move was taken back, the computer moves again.
    fn handle_undo(&mut self, output: &mut impl Write) -> anyhow::Result<()> {
        let Some(record) = self.game.undo() else {
            anyhow::bail!("nothing to undo");
        };
        writeln!(output, "undone {record}")?;
        if let Mode::Computer { computer, .. } = self.game.mode() {
            if record.piece.owner == computer {
                if let Some(record) = self.game.undo() {
                    writeln!(output, "undone {record}")?;
                }
            }
        }
        self.computer_reply(output)
    }

    /// Makes the computer move if it is its turn.
    fn computer_reply(&mut self, output: &mut impl Write) -> anyhow::Result<()> {
        if !self.game.is_computer_turn() {
            return Ok(());
        }
        let record = self.game.play_computer()?;
        self.report_bestmove(record, output)
    }

    fn report_bestmove(
        &self,
        record: Option<MoveRecord>,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        match record {
            Some(record) => self.report(&format!("bestmove {}", record.played), output),
            None => {
                writeln!(output, "bestmove (none)")?;
                Ok(())
            },
        }
    }

    /// Writes the message followed by the status when it is worth attention.
    fn report(&self, message: &str, output: &mut impl Write) -> anyhow::Result<()> {
        writeln!(output, "{message}")?;
        let status = self.game.status();
        if status.in_check || status.is_over() {
            writeln!(output, "status: {status}")?;
        }
        Ok(())
    }
}
