// lexguard/src/commands/mod.rs
//! Subcommand implementations. Every command treats its input line by line.

pub mod check;
pub mod mask;
pub mod normalize;
pub mod scan;

use anyhow::{Context, Result};
use std::io::Read;

use crate::cli::InputArgs;

/// Reads the whole input from the file named in `args`, or from stdin.
pub fn read_input(args: &InputArgs) -> Result<String> {
    match &args.input_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}
