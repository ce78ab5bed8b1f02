// lexguard-core/src/phrase_match.rs
//! Match records produced by the phrase scanner, plus debug-logging helpers
//! that keep matched phrases out of logs unless explicitly allowed.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether matched phrases may appear verbatim in debug logs.
    static ref PHRASE_DEBUG_ALLOWED: bool = {
        std::env::var("LEXGUARD_ALLOW_DEBUG_PHRASES")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A blacklisted phrase that survived whitelist suppression.
///
/// `start` and `end` are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch<C> {
    pub phrase: String,
    pub category: C,
    pub start: usize,
    pub end: usize,
    /// Width of the window the phrase was found in.
    pub tokens: usize,
}

impl<C> PhraseMatch<C> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(phrase: &str) -> String {
    if *PHRASE_DEBUG_ALLOWED {
        phrase.to_string()
    } else {
        redact_sensitive(phrase)
    }
}

pub fn log_phrase_match_debug(module_path: &str, category: &str, phrase: &str, start: usize, end: usize) {
    debug!(
        "{} Found PhraseMatch: Category='{}', Phrase='{}', Span={}..{}",
        module_path,
        category,
        get_loggable_content(phrase),
        start,
        end
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_match_serializes_with_category() {
        let m = PhraseMatch {
            phrase: "bad word".to_string(),
            category: 1u32,
            start: 10,
            end: 18,
            tokens: 2,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["phrase"], "bad word");
        assert_eq!(json["category"], 1);
        assert_eq!(m.len(), 8);
    }
}
