//! Adversary search: picks the computer's move for a given difficulty.
//!
//! Stronger difficulties run a fixed-depth [`minimax`] search with alpha-beta
//! pruning, the easiest one plays a random move.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::chess::board::Board;
use crate::chess::core::{Move, Player};
use crate::chess::rules::generate_moves;

mod minimax;
mod state;

pub use minimax::{best_move, minimax, search, SearchResult};

/// Search depth in plies.
pub type Depth = u8;

/// Strength of the computer opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Difficulty {
    /// Uniformly random moves.
    Easy,
    /// Two plies of minimax.
    Medium,
    /// Four plies of minimax.
    Hard,
}

impl Difficulty {
    /// Search depth of the difficulty, `None` if it does not search at all.
    #[must_use]
    pub const fn depth(self) -> Option<Depth> {
        match self {
            Self::Easy => None,
            Self::Medium => Some(2),
            Self::Hard => Some(4),
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => anyhow::bail!("difficulty should be easy, medium or hard, got '{input}'"),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}

/// Chooses the move `player` should make. Returns `None` when the player has
/// no moves.
#[must_use]
pub fn select_move(board: &Board, player: Player, difficulty: Difficulty) -> Option<Move> {
    select_move_with_rng(board, player, difficulty, &mut rand::thread_rng())
}

/// Same as [`select_move`] with an explicit source of randomness for the easy
/// difficulty.
#[must_use]
pub fn select_move_with_rng<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    match difficulty.depth() {
        None => generate_moves(board, player).choose(rng).copied(),
        Some(depth) => best_move(board, player, depth),
    }
}
