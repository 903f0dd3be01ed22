//! Implementation of [Minimax] algorithm with [Alpha-Beta pruning].
//!
//! Every explored move is simulated on a fresh copy of the board, so the
//! recursion never has to undo anything. Moves are explored in generation
//! order without any ordering heuristics.
//!
//! [Minimax]: https://en.wikipedia.org/wiki/Minimax
//! [Alpha-Beta pruning]: https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

use tracing::debug;

use crate::chess::board::Board;
use crate::chess::core::{Move, Player};
use crate::chess::rules::generate_moves;
use crate::evaluation::{evaluate, Score};
use crate::search::state::State;
use crate::search::Depth;

/// Outcome of [`search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` if the player has no moves.
    pub best_move: Option<Move>,
    /// Score of the best move from the searching player's perspective;
    /// `-INFINITY` when there are no moves.
    pub score: Score,
    /// Number of simulated positions.
    pub nodes: u64,
}

/// Scores a position with alpha-beta pruned minimax.
///
/// `ai` is the player whose perspective the evaluation takes. When
/// `maximizing` is set, it is `ai` to move, otherwise the opponent. A side
/// without any moves scores [`Score::NO_MOVES`] in favor of the other side,
/// no matter whether that is a checkmate or a stalemate.
#[must_use]
pub fn minimax(
    board: &Board,
    depth: Depth,
    alpha: Score,
    beta: Score,
    maximizing: bool,
    ai: Player,
) -> Score {
    alphabeta(&mut State::new(), board, depth, alpha, beta, maximizing, ai)
}

fn alphabeta(
    state: &mut State,
    board: &Board,
    depth: Depth,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    ai: Player,
) -> Score {
    if depth == 0 {
        return evaluate(board, ai);
    }
    let mover = if maximizing { ai } else { ai.opponent() };
    let moves = generate_moves(board, mover);
    if moves.is_empty() {
        return if maximizing {
            -Score::NO_MOVES
        } else {
            Score::NO_MOVES
        };
    }
    if maximizing {
        let mut best = -Score::INFINITY;
        for next_move in moves {
            state.visit();
            let value = alphabeta(
                state,
                &board.with_move(next_move),
                depth - 1,
                alpha,
                beta,
                false,
                ai,
            );
            best = best.max(value);
            alpha = alpha.max(value);
            if beta <= alpha {
                state.cutoff();
                break;
            }
        }
        best
    } else {
        let mut best = Score::INFINITY;
        for next_move in moves {
            state.visit();
            let value = alphabeta(
                state,
                &board.with_move(next_move),
                depth - 1,
                alpha,
                beta,
                true,
                ai,
            );
            best = best.min(value);
            beta = beta.min(value);
            if beta <= alpha {
                state.cutoff();
                break;
            }
        }
        best
    }
}

/// Picks the best move for the player looking `depth` plies ahead, together
/// with search statistics.
///
/// Each root move is scored with a full `(-INFINITY, INFINITY)` window and
/// only a strictly better score replaces the current best, so the earliest
/// generated move wins ties. Depth 0 is treated as depth 1.
#[must_use]
pub fn search(board: &Board, player: Player, depth: Depth) -> SearchResult {
    let mut state = State::new();
    let mut result = SearchResult {
        best_move: None,
        score: -Score::INFINITY,
        nodes: 0,
    };
    for next_move in generate_moves(board, player) {
        state.visit();
        let score = alphabeta(
            &mut state,
            &board.with_move(next_move),
            depth.saturating_sub(1),
            -Score::INFINITY,
            Score::INFINITY,
            false,
            player,
        );
        if score > result.score {
            result.score = score;
            result.best_move = Some(next_move);
        }
    }
    result.nodes = state.searched_nodes();
    debug!(
        %player,
        depth,
        nodes = result.nodes,
        cutoffs = state.cutoffs(),
        score = %result.score,
        best_move = %result.best_move.map_or_else(|| "(none)".to_string(), |m| m.to_string()),
        "search finished"
    );
    result
}

/// Shorthand for [`search`] when only the move matters.
#[must_use]
pub fn best_move(board: &Board, player: Player, depth: Depth) -> Option<Move> {
    search(board, player, depth).best_move
}
