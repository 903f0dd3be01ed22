#![no_main]
use chessmaster::chess::board::Board;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_placement(input) else {
        return;
    };
    // Parsed boards are printed back and parsed into the same board.
    assert_eq!(Board::from_placement(&board.to_string()).unwrap(), board);
});
