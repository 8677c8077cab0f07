use std::path::PathBuf;

use clap::Parser;

/// Lint and fix struct field ordering in Go source files.
///
/// Reports structs whose field order wastes alignment padding, or rewrites
/// them in place with `--fix`.
#[derive(Debug, Parser)]
#[command(name = "structpack", version, about)]
pub struct Cli {
    /// Rewrite suboptimal struct declarations in place.
    #[arg(long)]
    pub fix: bool,

    /// File or directory to analyze. Defaults to the current directory.
    pub path: Option<PathBuf>,
}
