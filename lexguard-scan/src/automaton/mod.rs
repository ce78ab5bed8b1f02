//! Leftmost-longest multi-token matching backed by a double-array
//! Aho-Corasick automaton.

use daachorse::{DoubleArrayAhoCorasick, DoubleArrayAhoCorasickBuilder, MatchKind};
extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::interval::Interval;

/// Raised when the automaton cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonError {
    message: String,
}

impl fmt::Display for AutomatonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AutomatonError {}

/// A span found by [`TokenAutomaton::find_spans`], tagged with the index of
/// the token that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub span: Interval,
    pub token: u32,
}

/// Finds non-overlapping token occurrences, preferring the leftmost start and
/// then the longest token at that start.
pub struct TokenAutomaton {
    automaton: DoubleArrayAhoCorasick<u32>,
    tokens: usize,
}

impl fmt::Debug for TokenAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAutomaton")
         .field("automaton", &"<DoubleArrayAhoCorasick>")
         .field("tokens", &self.tokens)
         .finish()
    }
}

impl TokenAutomaton {
    /// Builds the automaton. Token `i` is reported back as `TokenSpan::token == i`.
    /// Tokens must be non-empty and unique.
    pub fn new<I, P>(tokens: I) -> Result<Self, AutomatonError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let patvals: Vec<(P, u32)> = tokens
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p, i as u32))
            .collect();
        let count = patvals.len();
        if count == 0 {
            return Err(AutomatonError { message: "no tokens to compile".to_string() });
        }

        let automaton = DoubleArrayAhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .build_with_values(patvals)
            .map_err(|e| AutomatonError { message: e.to_string() })?;

        Ok(Self { automaton, tokens: count })
    }

    pub fn len(&self) -> usize {
        self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens == 0
    }

    pub fn find_spans(&self, haystack: &str) -> Vec<TokenSpan> {
        self.automaton
            .leftmost_find_iter(haystack)
            .map(|m| TokenSpan {
                span: Interval::new(m.start(), m.end()),
                token: m.value(),
            })
            .collect()
    }
}
