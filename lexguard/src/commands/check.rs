//! `lexguard check`

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use std::io::{self, Write};

use lexguard_core::Filter;

use crate::output::write_verdict;

/// Prints the verdict and returns whether any line is profane.
pub fn run_check(filter: &Filter, input: &str) -> Result<bool> {
    let profane_lines = input.lines().filter(|line| filter.is_profane(line)).count();
    info!("{} profane line(s).", profane_lines);

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();
    write_verdict(&mut out, profane_lines > 0, color)?;
    out.flush()?;
    Ok(profane_lines > 0)
}
