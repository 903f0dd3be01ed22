use std::io;

use chessmaster::chess::core::Player;
use chessmaster::chess::game::Mode;
use chessmaster::search::Difficulty;
use chessmaster::Engine;
use clap::Parser;
use tracing::Level;

/// Plays chess against a computer opponent or lets two players share the
/// board. Commands are read from the standard input, one per line; send `help`
/// to list them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Start a game against the computer at given difficulty.
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,
    /// The side played by the computer.
    #[arg(short, long, default_value = "black", value_parser = parse_player)]
    computer: Player,
    /// Log more details to stderr (repeat for even more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_player(input: &str) -> anyhow::Result<Player> {
    Player::try_from(input)
}

const fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(log_level(config.verbose))
        .init();

    chessmaster::print_engine_info();
    chessmaster::print_binary_info();

    let mode = match config.difficulty {
        Some(difficulty) => Mode::Computer {
            difficulty,
            computer: config.computer,
        },
        None => Mode::TwoPlayer,
    };
    let mut engine = Engine::new(mode);
    engine.run(&mut io::stdin().lock(), &mut io::stdout().lock())
}
