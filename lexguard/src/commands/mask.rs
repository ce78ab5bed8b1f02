//! `lexguard mask`

use anyhow::{Context, Result};
use log::info;
use std::io::{self, Write};
use std::path::Path;

use lexguard_core::Filter;

/// Normalized input with every match masked, line structure preserved.
pub fn mask_text(filter: &Filter, input: &str) -> String {
    let mut masked = String::with_capacity(input.len());
    for line in input.lines() {
        masked.push_str(&filter.remove_profane(line));
        masked.push('\n');
    }
    masked
}

pub fn run_mask(filter: &Filter, input: &str, output: Option<&Path>) -> Result<()> {
    let masked = mask_text(filter, input);
    match output {
        Some(path) => {
            std::fs::write(path, &masked)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Masked output written to {}", path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(masked.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
