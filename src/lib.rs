//! Chess rules engine with a computer opponent. For more information, see
//! [README].
//!
//! The crate is split into the rules of the game ([`chess`]), the static
//! [`evaluation`] of positions and the adversary [`search`]. The [`Engine`]
//! drives a [`chess::game::Game`] through a line-based text protocol.
//!
//! [README]: https://github.com/chessmaster-engine/chessmaster/blob/main/README.md

pub mod chess;
pub mod evaluation;
pub mod search;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Build target and profile. Produced by `build.rs`.
const TARGET: &str = include_str!(concat!(env!("OUT_DIR"), "/target"));

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints informations about the engine version and GitHub repository on
/// engine startup.
pub fn print_engine_info() {
    println!("Chessmaster {}", engine_version());
    println!("<{}>", env!("CARGO_PKG_REPOSITORY"));
}

/// Prints information about the build target and whether the build is clean
/// on engine startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    println!("Target: {TARGET}");
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
