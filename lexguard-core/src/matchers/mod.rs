//! Compiled per-category matchers.
//!
//! A [`CompiledMatcher`] is derived from one category's token table by
//! [`compiler::compile_category`] and never edited afterwards; it carries a
//! snapshot of the token-to-canonical lookup so edits to the registry have no
//! effect until the next build.
//!
//! License: MIT OR APACHE 2.0

pub mod compiler;

use lexguard_scan::automaton::TokenAutomaton;
use lexguard_scan::interval::Interval;
use regex::Regex;
use std::collections::HashMap;

use crate::category::Category;
use crate::config::MatchAction;

/// Byte span of a match.
pub type Span = Interval;

/// The matching capability the normalizer relies on.
pub trait TokenMatcher {
    /// Leftmost, non-overlapping token spans in `text`, in order.
    fn find_spans(&self, text: &str) -> Vec<Span>;
}

#[derive(Debug)]
pub(crate) enum MatcherKind {
    Never,
    Pattern(Regex),
    Automaton(TokenAutomaton),
}

/// Simple case folding as the pattern engine applies it under `i`: lowercase,
/// then merge the variant forms that lowercasing leaves apart.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'ς' => 'σ',
            'ſ' => 's',
            'µ' => 'μ',
            'ϐ' => 'β',
            'ϑ' => 'θ',
            'ϕ' => 'φ',
            'ϖ' => 'π',
            'ϰ' => 'κ',
            'ϱ' => 'ρ',
            'ϵ' => 'ε',
            '\u{0345}' | '\u{1FBE}' => 'ι',
            'ẛ' => 'ṡ',
            '\u{1C80}' => 'в',
            '\u{1C81}' => 'д',
            '\u{1C82}' => 'о',
            '\u{1C83}' => 'с',
            '\u{1C84}' | '\u{1C85}' => 'т',
            '\u{1C86}' => 'ъ',
            '\u{1C87}' => 'ѣ',
            '\u{1C88}' => 'ꙋ',
            other => other,
        })
        .collect()
}

/// Canonical value lookup, with an optional case-folded index for
/// case-insensitive categories.
#[derive(Debug, Default)]
pub(crate) struct CanonicalLookup {
    exact: HashMap<String, String>,
    folded: Option<HashMap<String, String>>,
}

impl CanonicalLookup {
    pub(crate) fn new(table: &HashMap<String, String>, case_insensitive: bool) -> Self {
        let folded = case_insensitive.then(|| {
            let mut keys: Vec<&String> = table.keys().collect();
            keys.sort();
            let mut folded = HashMap::with_capacity(keys.len());
            for key in keys {
                folded
                    .entry(fold_case(key))
                    .or_insert_with(|| table[key].clone());
            }
            folded
        });
        Self {
            exact: table.clone(),
            folded,
        }
    }

    fn resolve(&self, matched: &str) -> Option<&str> {
        if let Some(canonical) = self.exact.get(matched) {
            return Some(canonical.as_str());
        }
        self.folded
            .as_ref()
            .and_then(|f| f.get(&fold_case(matched)))
            .map(String::as_str)
    }
}

/// Matcher for one category.
#[derive(Debug)]
pub struct CompiledMatcher {
    category: Category,
    kind: MatcherKind,
    lookup: CanonicalLookup,
    action: MatchAction,
}

impl CompiledMatcher {
    /// A matcher that never matches.
    pub fn never(category: Category) -> Self {
        Self {
            category,
            kind: MatcherKind::Never,
            lookup: CanonicalLookup::default(),
            action: MatchAction::Replace,
        }
    }

    pub(crate) fn from_parts(
        category: Category,
        kind: MatcherKind,
        lookup: CanonicalLookup,
        action: MatchAction,
    ) -> Self {
        Self {
            category,
            kind,
            lookup,
            action,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn action(&self) -> MatchAction {
        self.action
    }

    pub fn is_never(&self) -> bool {
        matches!(self.kind, MatcherKind::Never)
    }

    pub fn is_automaton(&self) -> bool {
        matches!(self.kind, MatcherKind::Automaton(_))
    }

    /// Source of the compiled pattern, when regex-backed.
    pub fn pattern(&self) -> Option<&str> {
        match &self.kind {
            MatcherKind::Pattern(regex) => Some(regex.as_str()),
            _ => None,
        }
    }

    /// Canonical replacement for a matched token.
    pub fn canonical(&self, matched: &str) -> Option<&str> {
        self.lookup.resolve(matched)
    }

    /// Number of tokens compiled in.
    pub fn token_count(&self) -> usize {
        self.lookup.exact.len()
    }
}

impl TokenMatcher for CompiledMatcher {
    fn find_spans(&self, text: &str) -> Vec<Span> {
        match &self.kind {
            MatcherKind::Never => Vec::new(),
            MatcherKind::Pattern(regex) => regex
                .find_iter(text)
                .map(|m| Span::new(m.start(), m.end()))
                .collect(),
            MatcherKind::Automaton(automaton) => automaton
                .find_spans(text)
                .into_iter()
                .map(|found| found.span)
                .collect(),
        }
    }
}

/// Compiled matchers for every built category.
#[derive(Debug, Default)]
pub struct MatcherSet {
    matchers: HashMap<Category, CompiledMatcher>,
}

impl MatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, matcher: CompiledMatcher) {
        self.matchers.insert(matcher.category().clone(), matcher);
    }

    pub fn get(&self, category: &Category) -> Option<&CompiledMatcher> {
        self.matchers.get(category)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
