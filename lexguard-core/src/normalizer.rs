//! normalizer.rs - Applies compiled matchers to text, one category at a time.
//!
//! The categories are applied in the order given and each one sees the
//! output of the previous one, so the order is part of the result. Every
//! traversal is a pure function of the text, the matchers and the order.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

use crate::category::Category;
use crate::config::MatchAction;
use crate::matchers::{CompiledMatcher, MatcherSet, TokenMatcher};
use crate::registry::RuleRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Substitution {
    /// The canonical value, or nothing for delete-action categories.
    Canonical,
    Empty,
}

fn apply<'t>(
    matcher: &CompiledMatcher,
    text: Cow<'t, str>,
    mode: Substitution,
) -> (Cow<'t, str>, usize) {
    let spans = matcher.find_spans(&text);
    if spans.is_empty() {
        return (text, 0);
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut substituted = 0;
    for span in &spans {
        out.push_str(&text[last..span.start]);
        let matched = &text[span.start..span.end];
        if mode == Substitution::Canonical && matcher.action() == MatchAction::Replace {
            // Unresolved spans stay as they are and do not count.
            match matcher.canonical(matched) {
                Some(canonical) => {
                    out.push_str(canonical);
                    substituted += 1;
                }
                None => out.push_str(matched),
            }
        } else {
            substituted += 1;
        }
        last = span.end;
    }
    out.push_str(&text[last..]);
    (Cow::Owned(out), substituted)
}

fn traverse<'t>(
    set: &MatcherSet,
    text: &'t str,
    categories: &[Category],
    mode: Substitution,
) -> (Cow<'t, str>, usize) {
    let mut current = Cow::Borrowed(text);
    let mut total = 0;
    for category in categories {
        let Some(matcher) = set.get(category) else {
            continue;
        };
        if matcher.is_never() {
            continue;
        }
        let (next, count) = apply(matcher, current, mode);
        current = next;
        total += count;
    }
    (current, total)
}

impl MatcherSet {
    /// Replaces every match with its canonical value, category by category.
    pub fn clean(&self, text: &str, categories: &[Category]) -> String {
        traverse(self, text, categories, Substitution::Canonical)
            .0
            .into_owned()
    }

    /// Number of substitutions `clean` would make.
    pub fn count(&self, text: &str, categories: &[Category]) -> usize {
        traverse(self, text, categories, Substitution::Canonical).1
    }

    /// Like `clean`, but every match is deleted.
    pub fn remove(&self, text: &str, categories: &[Category]) -> String {
        traverse(self, text, categories, Substitution::Empty)
            .0
            .into_owned()
    }
}

impl RuleRegistry {
    pub fn clean(&self, text: &str, categories: &[Category]) -> String {
        self.matchers().clean(text, categories)
    }

    pub fn count(&self, text: &str, categories: &[Category]) -> usize {
        self.matchers().count(text, categories)
    }

    pub fn remove(&self, text: &str, categories: &[Category]) -> String {
        self.matchers().remove(text, categories)
    }

    /// `clean` over [`RuleRegistry::categories`].
    pub fn clean_default(&self, text: &str) -> String {
        self.clean(text, &self.categories())
    }
}
