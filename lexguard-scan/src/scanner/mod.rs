//! Whitelist-aware n-gram scanner.
//!
//! Every window produced by a [`Segmenter`] is looked up in the blacklist. On
//! the first hit the whitelist intervals for the whole text are computed (once
//! per call) and any candidate touching one of them is dropped.

extern crate alloc;
use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::interval::Interval;
use crate::lookup::PhraseLookup;
use crate::window::{Segmenter, Window};

/// A blacklisted window that survived whitelist suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit<'a, V> {
    pub text: &'a str,
    pub value: V,
    pub start: usize,
    pub end: usize,
    pub first_token: usize,
    pub token_count: usize,
}

impl<V> Hit<'_, V> {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Intervals of every window of `text` present in `whitelist`.
pub fn whitelisted_intervals<W>(text: &str, segmenter: &Segmenter, whitelist: &W) -> Vec<Interval>
where
    W: PhraseLookup + ?Sized,
{
    if whitelist.is_empty() {
        return Vec::new();
    }
    segmenter
        .windows(text)
        .filter(|w| whitelist.lookup(w.text).is_some())
        .map(|w| w.interval())
        .collect()
}

/// Scans `text` for blacklisted windows not covered by a whitelisted window.
///
/// Hits are ordered by start offset, longer hits first on ties.
pub fn scan<'a, B, W>(
    text: &'a str,
    segmenter: &Segmenter,
    blacklist: &B,
    whitelist: &W,
) -> Vec<Hit<'a, B::Value>>
where
    B: PhraseLookup + ?Sized,
    W: PhraseLookup + ?Sized,
{
    let mut hits = Vec::new();
    if blacklist.is_empty() {
        return hits;
    }

    let mut white: Option<Vec<Interval>> = None;

    for window in segmenter.windows(text) {
        let Some(value) = blacklist.lookup(window.text) else { continue; };

        let covered = white.get_or_insert_with(|| whitelisted_intervals(text, segmenter, whitelist));
        let candidate = window.interval();
        if covered.iter().any(|w| candidate.touches(w)) {
            continue;
        }

        hits.push(to_hit(window, value));
    }

    hits.sort_by_key(|h| (h.start, Reverse(h.end)));
    hits
}

fn to_hit<V>(window: Window<'_>, value: V) -> Hit<'_, V> {
    Hit {
        text: window.text,
        value,
        start: window.start,
        end: window.end,
        first_token: window.first_token,
        token_count: window.token_count,
    }
}
