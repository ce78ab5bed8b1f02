//! errors.rs - Custom error types for the lexguard-core library.
//!
//! One structured enum covers every failure the library can surface. The
//! first four variants are the rule/phrase taxonomy callers are expected to
//! match on; each of `Validation`, `DuplicateMapping` and `NotFound` can be
//! downgraded to a silent skip through [`ErrorPolicy`](crate::config::ErrorPolicy),
//! and `ConfigLoad` can be downgraded to skipping the default rule set.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `lexguard-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LexguardError {
    /// Empty or wrong-shaped token, phrase, range or option.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Token '{token}' in category '{category}' is already mapped to '{existing}'; refusing to remap it to '{requested}'")]
    DuplicateMapping {
        category: String,
        token: String,
        existing: String,
        requested: String,
    },

    /// `scope` is a category name, `blacklist` or `whitelist`.
    #[error("'{item}' not found in {scope}")]
    NotFound { scope: String, item: String },

    #[error("Failed to load rule set: {0}")]
    ConfigLoad(String),

    #[error("Failed to compile matcher for category '{0}': {1}")]
    MatcherCompilation(String, regex::Error),

    #[error("Failed to build token automaton for category '{0}': {1}")]
    AutomatonBuild(String, String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}

impl LexguardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config_load(message: impl Into<String>) -> Self {
        Self::ConfigLoad(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LexguardError>;
