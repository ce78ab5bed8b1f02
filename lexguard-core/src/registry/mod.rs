//! registry - Per-category obfuscation mappings and their compiled matchers.
//!
//! The [`RuleRegistry`] owns one `token -> canonical` table per category. Rules
//! are added through declarative bulk operations (series, ranges, parallels and
//! link products) and removed token by token. None of this touches the compiled
//! matchers: a mutated category is only marked stale, and the new rules take
//! effect on the next explicit [`RuleRegistry::build`].
//!
//! Every bulk operation applies its elements in order. Under the default
//! [`ErrorPolicy`] the first offending element aborts the call, and elements
//! applied before it stay applied; a permissive policy skips just that element.
//!
//! License: MIT OR APACHE 2.0

pub mod links;

use log::{debug, info};
use std::collections::{HashMap, HashSet};

use crate::category::Category;
use crate::config::{BuildOptions, ErrorPolicy};
use crate::errors::{LexguardError, Result};
use crate::matchers::compiler::compile_category;
use crate::matchers::MatcherSet;

pub use links::LinkMode;

/// Rule tables plus the matchers last compiled from them.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    policy: ErrorPolicy,
    tables: HashMap<Category, HashMap<String, String>>,
    /// Custom categories in first-registration order.
    custom_order: Vec<Category>,
    stale: HashSet<Category>,
    matchers: MatcherSet,
}

impl RuleRegistry {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &ErrorPolicy {
        &self.policy
    }

    /// Maps every token in `tokens` to `canonical`.
    pub fn add_series<I, S>(
        &mut self,
        category: &Category,
        canonical: &str,
        tokens: I,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.accept_canonical(category, canonical)? {
            return Ok(self);
        }
        for token in tokens {
            self.insert(category, token.as_ref(), canonical)?;
        }
        Ok(self)
    }

    /// Maps every codepoint in `start..=end` to `canonical`. Surrogates are skipped.
    pub fn add_range(
        &mut self,
        category: &Category,
        canonical: &str,
        start: u32,
        end: u32,
    ) -> Result<&mut Self> {
        if !self.accept_canonical(category, canonical)? {
            return Ok(self);
        }
        if start > end || end > char::MAX as u32 {
            self.policy.suppress(LexguardError::validation(format!(
                "invalid codepoint range U+{:04X}..=U+{:04X}",
                start, end
            )))?;
            return Ok(self);
        }

        let mut buf = [0u8; 4];
        for codepoint in start..=end {
            if let Some(c) = char::from_u32(codepoint) {
                let token: &str = c.encode_utf8(&mut buf);
                self.insert(category, token, canonical)?;
            }
        }
        Ok(self)
    }

    /// `canonicals[i]` governs every token in `groups[i]`.
    pub fn add_parallel<C, S, G, T>(
        &mut self,
        category: &Category,
        canonicals: C,
        groups: G,
    ) -> Result<&mut Self>
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
        G: IntoIterator,
        G::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let canonicals: Vec<S> = canonicals.into_iter().collect();
        let groups: Vec<G::Item> = groups.into_iter().collect();
        if canonicals.len() != groups.len() {
            self.policy.suppress(LexguardError::validation(format!(
                "parallel rule for '{}' has {} canonical value(s) but {} token group(s)",
                category,
                canonicals.len(),
                groups.len()
            )))?;
        }

        for (canonical, group) in canonicals.iter().zip(groups) {
            let canonical = canonical.as_ref();
            if !self.accept_canonical(category, canonical)? {
                continue;
            }
            for token in group {
                self.insert(category, token.as_ref(), canonical)?;
            }
        }
        Ok(self)
    }

    /// Maps every composite token of the link product of `factors` to `canonical`.
    pub fn add_link_product<F, A, S>(
        &mut self,
        category: &Category,
        canonical: &str,
        factors: F,
        mode: LinkMode,
    ) -> Result<&mut Self>
    where
        F: IntoIterator<Item = A>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.accept_canonical(category, canonical)? {
            return Ok(self);
        }
        let factors: Vec<Vec<String>> = factors
            .into_iter()
            .map(|f| f.into_iter().map(|s| s.as_ref().to_string()).collect())
            .collect();
        if factors.is_empty() || factors.iter().any(Vec::is_empty) {
            self.policy.suppress(LexguardError::validation(format!(
                "link product for '{}' needs at least one factor and no empty factor",
                category
            )))?;
            return Ok(self);
        }

        let tokens = links::expand(&factors, mode);
        debug!(
            "Link product ({:?}) for category '{}' expanded to {} token(s).",
            mode,
            category,
            tokens.len()
        );
        for token in &tokens {
            self.insert(category, token, canonical)?;
        }
        Ok(self)
    }

    pub fn add_links<F, A, S>(&mut self, category: &Category, canonical: &str, factors: F) -> Result<&mut Self>
    where
        F: IntoIterator<Item = A>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_link_product(category, canonical, factors, LinkMode::Unidirectional)
    }

    pub fn add_links_bidirectional<F, A, S>(
        &mut self,
        category: &Category,
        canonical: &str,
        factors: F,
    ) -> Result<&mut Self>
    where
        F: IntoIterator<Item = A>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_link_product(category, canonical, factors, LinkMode::Bidirectional)
    }

    pub fn add_links_mirror<F, A, S>(
        &mut self,
        category: &Category,
        canonical: &str,
        factors: F,
    ) -> Result<&mut Self>
    where
        F: IntoIterator<Item = A>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_link_product(category, canonical, factors, LinkMode::Mirror)
    }

    /// Deletes each token from the category's table.
    pub fn remove_mapping<I, S>(&mut self, category: &Category, tokens: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                self.policy.suppress(LexguardError::validation(format!(
                    "empty token in removal from '{}'",
                    category
                )))?;
                continue;
            }
            let removed = self
                .tables
                .get_mut(category)
                .and_then(|table| table.remove(token))
                .is_some();
            if removed {
                self.stale.insert(category.clone());
            } else {
                self.policy.suppress(LexguardError::NotFound {
                    scope: category.to_string(),
                    item: token.to_string(),
                })?;
            }
        }
        Ok(self)
    }

    /// Recompiles every category that has ever held a mapping. The previous
    /// matchers stay in place if any category fails to compile.
    pub fn build(&mut self, options: &BuildOptions) -> Result<()> {
        options.validate()?;
        let mut matchers = MatcherSet::new();
        for category in self.categories() {
            if let Some(table) = self.tables.get(&category) {
                let compiled = compile_category(&category, table, &options.options_for(&category))?;
                matchers.insert(compiled);
            }
        }
        info!(
            "Built {} matcher(s) over {} mapping(s).",
            matchers.len(),
            self.len()
        );
        self.matchers = matchers;
        self.stale.clear();
        Ok(())
    }

    /// True when `category` changed since the last build.
    pub fn is_stale(&self, category: &Category) -> bool {
        self.stale.contains(category)
    }

    pub fn mappings(&self, category: &Category) -> Option<&HashMap<String, String>> {
        self.tables.get(category)
    }

    pub fn canonical_for(&self, category: &Category, token: &str) -> Option<&str> {
        self.tables
            .get(category)
            .and_then(|table| table.get(token))
            .map(String::as_str)
    }

    /// Total number of mappings across categories.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Default processing order: the built-in order, then custom categories in
    /// the order they were first registered.
    pub fn categories(&self) -> Vec<Category> {
        Category::DEFAULT_ORDER
            .iter()
            .cloned()
            .chain(self.custom_order.iter().cloned())
            .collect()
    }

    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    fn accept_canonical(&self, category: &Category, canonical: &str) -> Result<bool> {
        if canonical.is_empty() {
            self.policy.suppress(LexguardError::validation(format!(
                "empty canonical value for category '{}'",
                category
            )))?;
            return Ok(false);
        }
        Ok(true)
    }

    fn insert(&mut self, category: &Category, token: &str, canonical: &str) -> Result<()> {
        if token.is_empty() {
            return self.policy.suppress(LexguardError::validation(format!(
                "empty token for '{}' in category '{}'",
                canonical, category
            )));
        }

        if let Some(existing) = self.canonical_for(category, token) {
            if existing == canonical {
                return Ok(());
            }
            if !self.policy.overwrite_duplicates {
                let err = LexguardError::DuplicateMapping {
                    category: category.to_string(),
                    token: token.to_string(),
                    existing: existing.to_string(),
                    requested: canonical.to_string(),
                };
                return self.policy.suppress(err);
            }
            debug!(
                "Remapping '{}' in category '{}' from '{}' to '{}'.",
                token, category, existing, canonical
            );
        }

        if !self.tables.contains_key(category) && !category.is_builtin() {
            self.custom_order.push(category.clone());
        }
        self.tables
            .entry(category.clone())
            .or_default()
            .insert(token.to_string(), canonical.to_string());
        self.stale.insert(category.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str) -> Category {
        Category::custom(name)
    }

    #[test]
    fn test_series_and_same_pair_is_noop() {
        let mut registry = RuleRegistry::default();
        registry
            .add_series(&Category::Number, "e", ["3"])
            .unwrap()
            .add_series(&Category::Number, "e", ["3"])
            .unwrap();
        assert_eq!(registry.canonical_for(&Category::Number, "3"), Some("e"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_policy() {
        let mut registry = RuleRegistry::default();
        registry.add_series(&Category::Number, "e", ["3"]).unwrap();
        let err = registry
            .add_series(&Category::Number, "b", ["3"])
            .unwrap_err();
        assert!(matches!(err, LexguardError::DuplicateMapping { .. }));

        let mut skipping = RuleRegistry::new(ErrorPolicy {
            disable_throw_on_duplicate_add: true,
            ..ErrorPolicy::default()
        });
        skipping
            .add_series(&Category::Number, "e", ["3"])
            .unwrap()
            .add_series(&Category::Number, "b", ["3", "8"])
            .unwrap();
        assert_eq!(skipping.canonical_for(&Category::Number, "3"), Some("e"));
        assert_eq!(skipping.canonical_for(&Category::Number, "8"), Some("b"));

        let mut overwriting = RuleRegistry::new(ErrorPolicy {
            overwrite_duplicates: true,
            ..ErrorPolicy::default()
        });
        overwriting
            .add_series(&Category::Number, "e", ["3"])
            .unwrap()
            .add_series(&Category::Number, "b", ["3"])
            .unwrap();
        assert_eq!(overwriting.canonical_for(&Category::Number, "3"), Some("b"));
    }

    #[test]
    fn test_strict_batch_keeps_earlier_elements() {
        let mut registry = RuleRegistry::default();
        let err = registry
            .add_series(&cat("c"), "x", ["a", "", "b"])
            .unwrap_err();
        assert!(matches!(err, LexguardError::Validation(_)));
        assert_eq!(registry.canonical_for(&cat("c"), "a"), Some("x"));
        assert_eq!(registry.canonical_for(&cat("c"), "b"), None);

        let mut permissive = RuleRegistry::new(ErrorPolicy::permissive());
        permissive.add_series(&cat("c"), "x", ["a", "", "b"]).unwrap();
        assert_eq!(permissive.len(), 2);
    }

    #[test]
    fn test_range_expands_inclusive() {
        let mut registry = RuleRegistry::default();
        registry.add_range(&cat("r"), "x", 'a' as u32, 'c' as u32).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.add_range(&cat("r"), "x", 5, 4).is_err());
        assert!(registry.add_range(&cat("r"), "x", 0, 0x11_0000).is_err());
    }

    #[test]
    fn test_range_skips_surrogates() {
        let mut registry = RuleRegistry::default();
        registry.add_range(&cat("r"), "x", 0xD7FF, 0xE000).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_parallel_and_mismatch() {
        let mut registry = RuleRegistry::default();
        registry
            .add_parallel(&Category::Emoji, ["a", "b"], [vec!["🅰", "ⓐ"], vec!["🅱"]])
            .unwrap();
        assert_eq!(registry.canonical_for(&Category::Emoji, "ⓐ"), Some("a"));
        assert_eq!(registry.canonical_for(&Category::Emoji, "🅱"), Some("b"));

        let err = registry
            .add_parallel(&Category::Emoji, ["c"], [vec!["ⓒ"], vec!["ⓓ"]])
            .unwrap_err();
        assert!(matches!(err, LexguardError::Validation(_)));

        let mut permissive = RuleRegistry::new(ErrorPolicy::permissive());
        permissive
            .add_parallel(&Category::Emoji, ["c"], [vec!["ⓒ"], vec!["ⓓ"]])
            .unwrap();
        assert_eq!(permissive.len(), 1);
    }

    #[test]
    fn test_links_mirror_registers_palindrome() {
        let mut registry = RuleRegistry::default();
        registry.add_links_mirror(&cat("m"), "z", [["a"], ["b"]]).unwrap();
        assert_eq!(registry.canonical_for(&cat("m"), "ab"), Some("z"));
        assert_eq!(registry.canonical_for(&cat("m"), "aba"), Some("z"));
    }

    #[test]
    fn test_links_reject_empty_factor() {
        let mut registry = RuleRegistry::default();
        let factors: Vec<Vec<&str>> = vec![vec!["a"], vec![]];
        assert!(registry.add_links(&cat("l"), "z", factors).is_err());
    }

    #[test]
    fn test_remove_mapping() {
        let mut registry = RuleRegistry::default();
        registry.add_series(&cat("c"), "x", ["a", "b"]).unwrap();
        registry.build(&BuildOptions::new()).unwrap();
        assert!(!registry.is_stale(&cat("c")));

        registry.remove_mapping(&cat("c"), ["a"]).unwrap();
        assert!(registry.is_stale(&cat("c")));
        let err = registry.remove_mapping(&cat("c"), ["a"]).unwrap_err();
        assert!(matches!(err, LexguardError::NotFound { .. }));
    }

    #[test]
    fn test_custom_categories_follow_builtins_in_registration_order() {
        let mut registry = RuleRegistry::default();
        registry
            .add_series(&cat("second"), "x", ["y"])
            .unwrap()
            .add_series(&cat("first"), "x", ["z"])
            .unwrap()
            .add_series(&cat("second"), "x", ["w"])
            .unwrap();
        let order = registry.categories();
        assert_eq!(&order[..5], &Category::DEFAULT_ORDER[..]);
        assert_eq!(&order[5..], &[cat("second"), cat("first")]);
    }

    #[test]
    fn test_build_is_explicit() {
        let mut registry = RuleRegistry::default();
        registry.add_series(&Category::Number, "e", ["3"]).unwrap();
        assert!(registry.matchers().get(&Category::Number).is_none());
        registry.build(&BuildOptions::new()).unwrap();
        let matcher = registry.matchers().get(&Category::Number).unwrap();
        assert_eq!(matcher.token_count(), 1);
    }
}
