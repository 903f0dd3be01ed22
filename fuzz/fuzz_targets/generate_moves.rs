#![no_main]
use chessmaster::chess::board::Board;
use chessmaster::chess::core::Player;
use chessmaster::chess::rules::{destinations, generate_moves, is_checkmate, is_stalemate};
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_placement(input) else {
        return;
    };
    for player in [Player::White, Player::Black] {
        let moves = generate_moves(&board, player);
        let per_square: usize = board
            .pieces()
            .filter(|(_, piece)| piece.owner == player)
            .map(|(square, _)| destinations(&board, square).len())
            .sum();
        assert_eq!(moves.len(), per_square);
        assert!(!(is_checkmate(&board, player) && is_stalemate(&board, player)));
    }
});
