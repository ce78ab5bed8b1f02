// lexguard/src/lib.rs
//! # Lexguard CLI
//!
//! Command-line front end for `lexguard-core`: argument parsing, settings
//! discovery, logging setup and the `check`, `scan`, `mask` and `normalize`
//! commands. Everything that touches text lives in the core crate.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod output;
pub mod settings;
