// lexguard/src/main.rs
//! Lexguard entry point.
//!
//! Loads settings, builds the filter with its phrase lists, then runs the
//! requested command over the input.

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::process::ExitCode;

use lexguard::cli::{Cli, Commands};
use lexguard::commands::{check, mask, normalize, read_input, scan};
use lexguard::logger;
use lexguard::output::warn_msg;
use lexguard::settings::load_settings;
use lexguard_core::Filter;

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    let settings = load_settings(args.config.as_deref())?;
    let config = settings.filter.build().context("Invalid filter settings")?;
    let mut filter: Filter = Filter::new(config).context("Failed to build filter")?;
    filter
        .load_phrases(settings.phrases)
        .context("Failed to load phrase lists")?;
    if filter.phrases().blacklist_len() == 0 && !args.quiet {
        warn_msg("blacklist is empty; nothing will be reported");
    }
    debug!("Running {:?}", args.command);

    match args.command {
        Commands::Check(input) => {
            let text = read_input(&input)?;
            if check::run_check(&filter, &text)? {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Scan(cmd) => {
            let text = read_input(&cmd.input)?;
            scan::run_scan(&filter, &text, cmd.json)?;
        }
        Commands::Mask(cmd) => {
            let text = read_input(&cmd.input)?;
            mask::run_mask(&filter, &text, cmd.output.as_deref())?;
        }
        Commands::Normalize(input) => {
            let text = read_input(&input)?;
            normalize::run_normalize(&filter, &text)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
