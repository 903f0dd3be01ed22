//! Commands of the line-based text protocol understood by [`super::Engine`].

use anyhow::Context;

use crate::chess::board::Board;
use crate::chess::core::{Move, Player, Square};
use crate::chess::game::Mode;
use crate::search::Difficulty;

#[derive(Debug, PartialEq)]
pub(super) enum Command {
    NewGame { mode: Mode },
    SetPosition { board: Board, side_to_move: Player },
    Play(Move),
    ListMoves { square: Option<Square> },
    Go { difficulty: Option<Difficulty> },
    Undo,
    Display,
    Status,
    Help,
    Quit,
}

pub(super) const HELP: &str = "\
commands:
  new [two|easy|medium|hard] [white|black]  start a new game
  position <placement|startpos> [w|b]       set up the board
  move <from><to> | move <from> <to>        play a move (also <from>-<to>)
  moves [square]                            list available moves
  go [easy|medium|hard]                     let the computer move
  undo                                      take back the last move
  d                                         print the board
  status                                    print the game status
  help                                      print this message
  quit                                      exit";

fn parse_new(parts: &[&str]) -> anyhow::Result<Command> {
    let mode = match parts.get(1) {
        None | Some(&"two") => {
            if let Some(extra) = parts.get(2) {
                anyhow::bail!("unexpected '{extra}' for a two player game");
            }
            Mode::TwoPlayer
        },
        Some(difficulty) => Mode::Computer {
            difficulty: Difficulty::try_from(*difficulty)?,
            computer: parts
                .get(2)
                .map_or(Ok(Player::Black), |player| Player::try_from(*player))?,
        },
    };
    Ok(Command::NewGame { mode })
}

fn parse_position(parts: &[&str]) -> anyhow::Result<Command> {
    let board = match parts.get(1) {
        None => anyhow::bail!("position requires a placement or 'startpos'"),
        Some(&"startpos") => Board::starting(),
        Some(placement) => Board::from_placement(placement)
            .with_context(|| format!("invalid placement '{placement}'"))?,
    };
    let side_to_move = parts
        .get(2)
        .map_or(Ok(Player::White), |player| Player::try_from(*player))?;
    Ok(Command::SetPosition {
        board,
        side_to_move,
    })
}

fn parse_move(parts: &[&str]) -> anyhow::Result<Command> {
    let next_move = match parts {
        [_, uci] => Move::from_uci(uci)?,
        [_, from, to] => Move::new(Square::try_from(*from)?, Square::try_from(*to)?),
        _ => anyhow::bail!("move should be 'move e2e4' or 'move e2 e4'"),
    };
    Ok(Command::Play(next_move))
}

/// Parses `e2-e4`.
fn parse_dashed(input: &str) -> Option<Move> {
    let (from, to) = input.split_once('-')?;
    Some(Move::new(
        Square::try_from(from).ok()?,
        Square::try_from(to).ok()?,
    ))
}

impl Command {
    pub(super) fn parse(input: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();

        let Some(&first) = parts.first() else {
            anyhow::bail!("empty command");
        };

        match first {
            "new" => parse_new(&parts),
            "position" => parse_position(&parts),
            "move" => parse_move(&parts),
            "moves" => match parts.get(1) {
                None => Ok(Self::ListMoves { square: None }),
                Some(square) => Ok(Self::ListMoves {
                    square: Some(Square::try_from(*square)?),
                }),
            },
            "go" => match parts.get(1) {
                None => Ok(Self::Go { difficulty: None }),
                Some(difficulty) => Ok(Self::Go {
                    difficulty: Some(Difficulty::try_from(*difficulty)?),
                }),
            },
            "undo" => Ok(Self::Undo),
            "d" => Ok(Self::Display),
            "status" => Ok(Self::Status),
            "help" => Ok(Self::Help),
            "quit" => Ok(Self::Quit),
            _ => match (parts.len(), parse_dashed(first)) {
                (1, Some(next_move)) => Ok(Self::Play(next_move)),
                _ => anyhow::bail!("unknown command: {}", input.trim()),
            },
        }
    }
}
