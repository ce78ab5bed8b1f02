// lexguard/src/cli.rs
//! Command-line interface definition for `lexguard`.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "lexguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect and mask obfuscated restricted phrases",
    long_about = "Lexguard canonicalizes text that hides words behind look-alike characters, invisible separators, emoji letters, emoticons or digit substitutions, then checks the result against a blacklist of phrases while honouring a whitelist.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Settings file with filter options and phrase lists (YAML).
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "LEXGUARD_CONFIG",
        global = true,
        help = "Path to a settings file (YAML). Defaults to <config dir>/lexguard/config.yaml when present."
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reports whether the input contains a blacklisted phrase.
    #[command(about = "Print 'profane' or 'clean'; exits with 1 when profane.")]
    Check(InputArgs),

    /// Lists every surviving match.
    #[command(about = "List every blacklisted phrase found in the input.")]
    Scan(ScanCommand),

    /// Masks matches in the normalized input.
    #[command(about = "Print the normalized input with every match masked.")]
    Mask(MaskCommand),

    /// Prints the canonical form of the input.
    #[command(about = "Print the canonical form of the input.")]
    Normalize(InputArgs),
}

/// Where to read input from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read input from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,
}

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print matches as JSON lines instead of a table.
    #[arg(long, help = "Print one JSON object per match instead of a table.")]
    pub json: bool,
}

/// Arguments for the `mask` command.
#[derive(Args, Debug)]
pub struct MaskCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write masked output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a file instead of stdout.")]
    pub output: Option<PathBuf>,
}
