//! Version command for the sseconv CLI.

/// The current version of sseconv, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The line printed by `--version`.
pub fn version_line() -> String {
    format!("sseconv {}", VERSION)
}
