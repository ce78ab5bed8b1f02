//! Token segmentation and n-gram windows.
//!
//! Text is split on a single separator character. A window is a contiguous run
//! of `1..=max_window` tokens; because tokens are joined by the same separator
//! they were split on, the text of every window is a plain substring of the
//! input and can be borrowed instead of rebuilt.

extern crate alloc;
use alloc::vec::Vec;

use crate::interval::Interval;

/// Splits text into tokens and enumerates bounded n-gram windows over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    separator: char,
    max_window: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            separator: ' ',
            max_window: 6,
        }
    }
}

impl Segmenter {
    /// A `max_window` of zero is treated as one.
    pub fn new(separator: char, max_window: usize) -> Self {
        Self {
            separator,
            max_window: max_window.max(1),
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn max_window(&self) -> usize {
        self.max_window
    }

    /// Byte spans of each token. An empty string yields a single empty token,
    /// and adjacent separators yield empty tokens between them.
    pub fn token_spans(&self, text: &str) -> Vec<Interval> {
        let mut spans = Vec::new();
        let mut start = 0;
        for (idx, ch) in text.char_indices() {
            if ch == self.separator {
                spans.push(Interval::new(start, idx));
                start = idx + ch.len_utf8();
            }
        }
        spans.push(Interval::new(start, text.len()));
        spans
    }

    /// Every window over `text`, widest first and left to right within a width.
    pub fn windows<'a>(&self, text: &'a str) -> Windows<'a> {
        let spans = self.token_spans(text);
        let width = self.max_window.min(spans.len());
        Windows {
            text,
            spans,
            width,
            first: 0,
        }
    }
}

/// One candidate phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub text: &'a str,
    pub first_token: usize,
    pub token_count: usize,
    pub start: usize,
    pub end: usize,
}

impl Window<'_> {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Iterator returned by [`Segmenter::windows`].
#[derive(Debug)]
pub struct Windows<'a> {
    text: &'a str,
    spans: Vec<Interval>,
    width: usize,
    first: usize,
}

impl Windows<'_> {
    /// Number of tokens the text was split into.
    pub fn token_count(&self) -> usize {
        self.spans.len()
    }
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.width > 0 {
            if self.first + self.width <= self.spans.len() {
                let start = self.spans[self.first].start;
                let end = self.spans[self.first + self.width - 1].end;
                let window = Window {
                    text: &self.text[start..end],
                    first_token: self.first,
                    token_count: self.width,
                    start,
                    end,
                };
                self.first += 1;
                return Some(window);
            }
            self.width -= 1;
            self.first = 0;
        }
        None
    }
}
