//! compiler.rs - Turns one category's token table into a `CompiledMatcher`.
//!
//! Tokens are partitioned into single-codepoint tokens, which become one
//! character class, and everything else, which becomes an alternation ordered
//! longest-first so the longest token wins at any position. Without wildcard
//! mode the alternation is fenced by half word-boundaries: a token may not be
//! glued to a word character on either side, which also holds for tokens made
//! of punctuation.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::RegexBuilder;
use std::collections::HashMap;

use lexguard_scan::automaton::TokenAutomaton;

use super::{CanonicalLookup, CompiledMatcher, MatcherKind};
use crate::category::Category;
use crate::config::{CategoryOptions, Enforce, MatcherBackend};
use crate::errors::{LexguardError, Result};

/// Upper bound on the size of one compiled pattern.
pub const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

fn is_single_codepoint(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Splits tokens into (class members, alternation members), both sorted.
pub(crate) fn partition_tokens<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
    options: &CategoryOptions,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let class_eligible = options.wildcard || options.enforce == Enforce::Brackets;
    let (mut singles, mut multis): (Vec<&str>, Vec<&str>) = tokens
        .into_iter()
        .partition(|t| class_eligible && is_single_codepoint(t));

    singles.sort_unstable();
    singles.dedup();
    multis.sort_unstable_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    multis.dedup();
    (singles, multis)
}

/// Pattern source for the given partition. Empty when there is nothing to match.
pub(crate) fn build_pattern(singles: &[&str], multis: &[&str], wildcard: bool) -> String {
    let mut branches = Vec::with_capacity(2);

    if !multis.is_empty() {
        let alternation = multis
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        if wildcard {
            branches.push(format!("(?:{})", alternation));
        } else {
            branches.push(format!(r"\b{{start-half}}(?:{})\b{{end-half}}", alternation));
        }
    }

    if !singles.is_empty() {
        let class: String = singles.iter().map(|t| regex::escape(t)).collect();
        branches.push(format!("[{}]", class));
    }

    branches.join("|")
}

/// Compiles `table` (token -> canonical) for `category`.
pub fn compile_category(
    category: &Category,
    table: &HashMap<String, String>,
    options: &CategoryOptions,
) -> Result<CompiledMatcher> {
    if table.is_empty() {
        return Ok(CompiledMatcher::never(category.clone()));
    }

    let flags = options
        .regex_flags()
        .map_err(|e| LexguardError::validation(format!("category '{}': {}", category, e)))?;
    let lookup = CanonicalLookup::new(table, flags.case_insensitive);

    let wants_automaton = options.backend == MatcherBackend::Automaton;
    if wants_automaton && options.wildcard && !flags.case_insensitive {
        let mut tokens: Vec<&str> = table.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        let automaton = TokenAutomaton::new(tokens.iter())
            .map_err(|e| LexguardError::AutomatonBuild(category.to_string(), e.to_string()))?;
        debug!(
            "Category '{}' compiled to an automaton over {} token(s).",
            category,
            automaton.len()
        );
        return Ok(CompiledMatcher::from_parts(
            category.clone(),
            MatcherKind::Automaton(automaton),
            lookup,
            options.action,
        ));
    }
    if wants_automaton {
        debug!(
            "Category '{}' requested the automaton backend but is not wildcard/case-sensitive; using a pattern instead.",
            category
        );
    }

    let (singles, multis) = partition_tokens(table.keys().map(String::as_str), options);
    let pattern = build_pattern(&singles, &multis, options.wildcard);
    debug!(
        "Compiling category '{}': {} class token(s), {} alternation token(s).",
        category,
        singles.len(),
        multis.len()
    );

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_matches_new_line)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| LexguardError::MatcherCompilation(category.to_string(), e))?;

    Ok(CompiledMatcher::from_parts(
        category.clone(),
        MatcherKind::Pattern(regex),
        lookup,
        options.action,
    ))
}
