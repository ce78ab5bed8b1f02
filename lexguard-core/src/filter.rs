// lexguard-core/src/filter.rs
//! `filter.rs`
//! The high-level entry point: one value that owns a rule registry, a phrase
//! scanner and an interner, and runs text through normalization and scanning.
//!
//! A `Filter` is an ordinary value. Construct it once from a [`FilterConfig`]
//! and pass it to whatever needs it; nothing here is global. Detection calls
//! take `&self` and may run concurrently. Changing rules or phrase lists takes
//! `&mut self`, so the borrow checker keeps edits apart from detection.

use log::{info, warn};
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{FilterConfig, PhraseLists};
use crate::errors::Result;
use crate::interner::Interner;
use crate::phrase_match::PhraseMatch;
use crate::registry::RuleRegistry;
use crate::ruleset::RuleSet;
use crate::scanner::{PhraseIndex, PhraseScanner};

/// Normalizes text and scans it for blacklisted phrases.
///
/// `C` is the caller's category type for phrases, defaulting to plain numbers.
#[derive(Debug)]
pub struct Filter<C = u32> {
    config: FilterConfig,
    registry: RuleRegistry,
    scanner: PhraseScanner<C>,
    interner: Mutex<Interner>,
}

impl<C: Clone + Ord + Display> Filter<C> {
    /// Builds a filter, loading the configured rule set into a fresh registry.
    pub fn new(config: FilterConfig) -> Result<Self> {
        let registry = RuleRegistry::new(config.errors());
        Self::with_registry(config, registry)
    }

    /// Builds a filter on top of an already populated registry. The configured
    /// rule set is still applied to it, then every category is compiled.
    pub fn with_registry(config: FilterConfig, mut registry: RuleRegistry) -> Result<Self> {
        if let Some(rules) = Self::load_rule_set(&config)? {
            rules.apply(&mut registry)?;
        }
        registry.build(config.build_options())?;

        let interner = match config.intern_capacity() {
            Some(capacity) => Interner::with_capacity(capacity),
            None => Interner::new(),
        };
        let scanner = PhraseScanner::new(*config.scan(), config.errors());
        info!(
            "Filter ready: {} mapping(s), interning {}.",
            registry.len(),
            if config.use_interning() { "on" } else { "off" }
        );

        Ok(Self {
            config,
            registry,
            scanner,
            interner: Mutex::new(interner),
        })
    }

    fn load_rule_set(config: &FilterConfig) -> Result<Option<RuleSet>> {
        let loaded = match config.rule_set_path() {
            Some(path) => RuleSet::load_from_file(path),
            None if config.load_default_rules() => RuleSet::load_default(),
            None => return Ok(None),
        };
        match loaded {
            Ok(rules) => Ok(Some(rules)),
            Err(e) if config.errors().disable_throw_on_config_load => {
                warn!("Skipping rule set: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Mutable access to the rules. Edits take effect after [`Filter::rebuild`].
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Recompiles the matchers and drops every memoized canonical form.
    pub fn rebuild(&mut self) -> Result<()> {
        self.registry.build(self.config.build_options())?;
        self.lock_interner().clear();
        Ok(())
    }

    pub fn phrases(&self) -> &PhraseIndex<C> {
        self.scanner.index()
    }

    pub fn blacklist<I, S>(&mut self, category: C, phrases: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let phrase = self.list_form(phrase.as_ref());
            self.scanner.index_mut().blacklist(phrase, category.clone())?;
        }
        Ok(self)
    }

    pub fn blacklist_remove<I, S>(&mut self, phrases: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let phrase = self.list_form(phrase.as_ref());
            self.scanner.index_mut().blacklist_remove(&phrase)?;
        }
        Ok(self)
    }

    pub fn whitelist<I, S>(&mut self, phrases: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let phrase = self.list_form(phrase.as_ref());
            self.scanner.index_mut().whitelist(phrase)?;
        }
        Ok(self)
    }

    pub fn whitelist_remove<I, S>(&mut self, phrases: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let phrase = self.list_form(phrase.as_ref());
            self.scanner.index_mut().whitelist_remove(&phrase)?;
        }
        Ok(self)
    }

    /// Adds every group and whitelist entry of `lists`.
    pub fn load_phrases(&mut self, lists: PhraseLists<C>) -> Result<&mut Self> {
        for group in lists.blacklist {
            self.blacklist(group.category, &group.phrases)?;
        }
        self.whitelist(&lists.whitelist)?;
        info!(
            "Phrase lists loaded: {} blacklisted, {} whitelisted.",
            self.phrases().blacklist_len(),
            self.phrases().whitelist_len()
        );
        Ok(self)
    }

    /// Canonical form of `text`, memoized per distinct input when interning is on.
    pub fn normalize(&self, text: &str) -> String {
        if !self.config.use_interning() {
            return self.canonicalize(text);
        }
        let handle = self.lock_interner().intern(text);
        handle.derived_or_init(|s| self.canonicalize(s)).to_string()
    }

    pub fn is_profane(&self, text: &str) -> bool {
        self.scanner.is_profane(&self.normalize(text))
    }

    pub fn find_categories(&self, text: &str) -> Vec<C> {
        self.scanner.find_categories(&self.normalize(text))
    }

    /// Matches in the normalized text; offsets refer to `normalize(text)`.
    pub fn scan(&self, text: &str) -> Vec<PhraseMatch<C>> {
        self.scanner.scan(&self.normalize(text))
    }

    /// The normalized text with every surviving match masked.
    pub fn remove_profane(&self, text: &str) -> String {
        self.scanner.mask(&self.normalize(text))
    }

    fn canonicalize(&self, text: &str) -> String {
        match self.config.order() {
            Some(order) => self.registry.clean(text, order),
            None => self.registry.clean_default(text),
        }
    }

    fn list_form(&self, phrase: &str) -> String {
        if self.config.clean_lists() {
            self.canonicalize(phrase)
        } else {
            phrase.to_string()
        }
    }

    fn lock_interner(&self) -> MutexGuard<'_, Interner> {
        self.interner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::config::FilterSettings;

    fn filter() -> Filter {
        Filter::new(FilterConfig::default()).unwrap()
    }

    #[test]
    fn test_obfuscated_phrase_is_found() {
        let mut f = filter();
        f.blacklist(1, ["bad word"]).unwrap();
        assert!(f.is_profane("this is a b4d w0rd"));
        assert!(f.is_profane("ⓑⓐⓓ word"));
        assert!(!f.is_profane("this is fine"));
    }

    #[test]
    fn test_lists_are_cleaned_before_storing() {
        let mut f = filter();
        f.blacklist(1, ["b4d"]).unwrap();
        assert_eq!(f.phrases().category_of("bad"), Some(&1));
        f.blacklist_remove(["bad"]).unwrap();
        assert_eq!(f.phrases().blacklist_len(), 0);

        let config = FilterSettings::default().with_clean_lists(false).build().unwrap();
        let mut raw: Filter = Filter::new(config).unwrap();
        raw.blacklist(1, ["b4d"]).unwrap();
        assert_eq!(raw.phrases().category_of("b4d"), Some(&1));
    }

    #[test]
    fn test_remove_profane_masks_normalized_text() {
        let mut f = filter();
        f.blacklist(2, ["bad"]).unwrap();
        assert_eq!(f.remove_profane("so b4d here"), "so *** here");
    }

    #[test]
    fn test_rebuild_clears_memoized_forms() {
        let mut f = filter();
        assert_eq!(f.normalize("q"), "q");
        f.registry_mut()
            .add_series(&Category::custom("letters"), "k", ["q"])
            .unwrap();
        assert_eq!(f.normalize("q"), "q");
        f.rebuild().unwrap();
        assert_eq!(f.normalize("q"), "k");
    }

    #[test]
    fn test_without_default_rules() {
        let config = FilterSettings::default().with_default_rules(false).build().unwrap();
        let f: Filter = Filter::new(config).unwrap();
        assert!(f.registry().is_empty());
        assert_eq!(f.normalize("h3ll0"), "h3ll0");
    }
}
