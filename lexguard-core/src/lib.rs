// lexguard-core/src/lib.rs
//! # Lexguard Core Library
//!
//! `lexguard-core` finds restricted phrases in user-supplied text even when the
//! text has been obfuscated with look-alike characters, invisible separators,
//! emoji letters, emoticons or digit substitutions. It first rewrites the text
//! into a canonical form using per-category rules, then scans the canonical
//! form for blacklisted phrases while honouring a whitelist.
//!
//! The library does no I/O beyond reading rule-set and settings files on
//! request, and keeps no global state: every piece of mutable state lives in
//! a value the caller owns.
//!
//! ## Modules
//!
//! * `category`: The normalization categories and their default order.
//! * `config`: Settings, validated configuration and the shared error policy.
//! * `registry`: Per-category `token -> canonical` rules and their bulk builders.
//! * `matchers`: Compiled per-category matchers and the compiler producing them.
//! * `normalizer`: Applies compiled matchers in order (`clean`, `count`, `remove`).
//! * `ruleset`: Declarative rule-set documents, including the embedded default.
//! * `scanner`: The phrase index and the whitelist-aware n-gram scanner.
//! * `phrase_match`: Match records and redacting debug-log helpers.
//! * `interner`: Bounded interner memoizing canonical forms.
//! * `filter`: The [`Filter`] tying all of the above together.
//! * `errors`: The [`LexguardError`] taxonomy.
//!
//! ## Usage Example
//!
//! ```rust
//! use lexguard_core::{Filter, FilterSettings};
//!
//! fn main() -> Result<(), lexguard_core::LexguardError> {
//!     let config = FilterSettings::default().with_placeholder("#").build()?;
//!     let mut filter: Filter = Filter::new(config)?;
//!
//!     filter.blacklist(1, ["bad word"])?;
//!     filter.whitelist(["bad word actor"])?;
//!
//!     assert!(filter.is_profane("what a b4d w0rd"));
//!     assert!(!filter.is_profane("a bad word actor"));
//!     assert_eq!(filter.remove_profane("such a b4d word"), "such a ########");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible call returns [`Result`], whose error is a [`LexguardError`].
//! Validation, duplicate-mapping, missing-removal and rule-set loading errors
//! can each be downgraded to a silent skip through [`ErrorPolicy`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod category;
pub mod config;
pub mod errors;
pub mod filter;
pub mod interner;
pub mod matchers;
pub mod normalizer;
pub mod phrase_match;
pub mod registry;
pub mod ruleset;
pub mod scanner;

pub use category::Category;

pub use config::{
    BlacklistGroup, BuildOptions, CategoryOptions, CategoryOverrides, Enforce, ErrorPolicy,
    FilterConfig, FilterSettings, MatchAction, MatcherBackend, PhraseLists, RegexFlags,
    ScanConfig,
};

pub use errors::{LexguardError, Result};

pub use filter::Filter;
pub use interner::{Interned, Interner};
pub use matchers::{CompiledMatcher, MatcherSet, TokenMatcher};
pub use phrase_match::PhraseMatch;
pub use registry::{LinkMode, RuleRegistry};
pub use ruleset::RuleSet;
pub use scanner::{PhraseIndex, PhraseScanner};
