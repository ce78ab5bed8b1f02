//! scanner.rs - Phrase index and the whitelist-aware phrase scanner.
//!
//! The [`PhraseIndex`] holds the categorized blacklist and the whitelist.
//! Changes to either take effect on the next scan; there is no build step.
//! The [`PhraseScanner`] pairs an index with a [`ScanConfig`] and runs the
//! sliding-window search from `lexguard-scan` over it.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

use lexguard_scan::interval::Interval;
use lexguard_scan::mask::mask_spans;
use lexguard_scan::scanner::scan;
use lexguard_scan::window::Segmenter;

use crate::config::{ErrorPolicy, ScanConfig};
use crate::errors::{LexguardError, Result};
use crate::phrase_match::{log_phrase_match_debug, PhraseMatch};

/// Blacklist (phrase -> category) and whitelist (phrase) tables.
#[derive(Debug, Clone, Default)]
pub struct PhraseIndex<C> {
    policy: ErrorPolicy,
    blacklist: HashMap<String, C>,
    whitelist: HashSet<String>,
}

impl<C> PhraseIndex<C> {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            blacklist: HashMap::new(),
            whitelist: HashSet::new(),
        }
    }

    /// Adds or re-categorizes a blacklisted phrase. The last category wins.
    pub fn blacklist(&mut self, phrase: impl Into<String>, category: C) -> Result<&mut Self> {
        let phrase = phrase.into();
        if phrase.is_empty() {
            self.policy
                .suppress(LexguardError::validation("empty blacklist phrase"))?;
            return Ok(self);
        }
        self.blacklist.insert(phrase, category);
        Ok(self)
    }

    pub fn blacklist_remove(&mut self, phrase: &str) -> Result<&mut Self> {
        if self.blacklist.remove(phrase).is_none() {
            self.policy.suppress(LexguardError::NotFound {
                scope: "blacklist".to_string(),
                item: phrase.to_string(),
            })?;
        }
        Ok(self)
    }

    pub fn whitelist(&mut self, phrase: impl Into<String>) -> Result<&mut Self> {
        let phrase = phrase.into();
        if phrase.is_empty() {
            self.policy
                .suppress(LexguardError::validation("empty whitelist phrase"))?;
            return Ok(self);
        }
        self.whitelist.insert(phrase);
        Ok(self)
    }

    pub fn whitelist_remove(&mut self, phrase: &str) -> Result<&mut Self> {
        if !self.whitelist.remove(phrase) {
            self.policy.suppress(LexguardError::NotFound {
                scope: "whitelist".to_string(),
                item: phrase.to_string(),
            })?;
        }
        Ok(self)
    }

    pub fn category_of(&self, phrase: &str) -> Option<&C> {
        self.blacklist.get(phrase)
    }

    pub fn is_whitelisted(&self, phrase: &str) -> bool {
        self.whitelist.contains(phrase)
    }

    /// Whitelisted phrases, sorted.
    pub fn whitelist_values(&self) -> Vec<String> {
        let mut values: Vec<String> = self.whitelist.iter().cloned().collect();
        values.sort();
        values
    }

    pub fn blacklist_len(&self) -> usize {
        self.blacklist.len()
    }

    pub fn whitelist_len(&self) -> usize {
        self.whitelist.len()
    }
}

impl<C: Clone + Ord> PhraseIndex<C> {
    /// Blacklisted phrases grouped by category, each group sorted.
    pub fn blacklist_values(&self) -> BTreeMap<C, Vec<String>> {
        let mut grouped: BTreeMap<C, Vec<String>> = BTreeMap::new();
        for (phrase, category) in &self.blacklist {
            grouped
                .entry(category.clone())
                .or_default()
                .push(phrase.clone());
        }
        for phrases in grouped.values_mut() {
            phrases.sort();
        }
        grouped
    }
}

/// Sliding-window scanner over a [`PhraseIndex`].
#[derive(Debug, Clone)]
pub struct PhraseScanner<C> {
    index: PhraseIndex<C>,
    config: ScanConfig,
    segmenter: Segmenter,
}

impl<C: Clone + std::fmt::Display> PhraseScanner<C> {
    pub fn new(config: ScanConfig, policy: ErrorPolicy) -> Self {
        Self::with_index(PhraseIndex::new(policy), config)
    }

    pub fn with_index(index: PhraseIndex<C>, config: ScanConfig) -> Self {
        Self {
            index,
            config,
            segmenter: Segmenter::new(config.separator(), config.max_window()),
        }
    }

    pub fn index(&self) -> &PhraseIndex<C> {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut PhraseIndex<C> {
        &mut self.index
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Surviving matches, ordered by start offset (longer first on ties).
    pub fn scan(&self, text: &str) -> Vec<PhraseMatch<C>> {
        let hits = scan(text, &self.segmenter, &self.index.blacklist, &self.index.whitelist);
        debug!("Scanned {} byte(s): {} surviving match(es).", text.len(), hits.len());
        hits.into_iter()
            .map(|hit| {
                log_phrase_match_debug(
                    module_path!(),
                    &hit.value.to_string(),
                    hit.text,
                    hit.start,
                    hit.end,
                );
                PhraseMatch {
                    phrase: hit.text.to_string(),
                    category: hit.value,
                    start: hit.start,
                    end: hit.end,
                    tokens: hit.token_count,
                }
            })
            .collect()
    }

    pub fn is_profane(&self, text: &str) -> bool {
        !self.scan(text).is_empty()
    }

    /// One category per surviving match, duplicates kept.
    pub fn find_categories(&self, text: &str) -> Vec<C> {
        self.scan(text).into_iter().map(|m| m.category).collect()
    }

    /// `text` with every surviving match replaced by the placeholder, one per
    /// character. Overlapping matches are masked as a single run.
    pub fn mask(&self, text: &str) -> String {
        let spans: Vec<Interval> = self
            .scan(text)
            .iter()
            .map(|m| Interval::new(m.start, m.end))
            .collect();
        mask_spans(text, &spans, self.config.placeholder())
    }
}
