//! Span masking.
//!
//! Spans are merged first so overlapping matches become a single masked run,
//! then the output is assembled in one pass by copying the untouched text
//! between runs. Offsets therefore always refer to the original input.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::interval::{merge_overlapping, Interval};

/// Replaces every character inside `spans` with `placeholder`.
///
/// Spans must lie on `char` boundaries of `text`; spans reaching past the end
/// are clamped. The result has the same number of characters as `text`.
pub fn mask_spans(text: &str, spans: &[Interval], placeholder: char) -> String {
    let runs = merge_overlapping(spans.to_vec());
    if runs.is_empty() {
        return String::from(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for run in runs {
        let start = run.start.min(text.len()).max(cursor);
        let end = run.end.min(text.len());
        if end <= start {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.extend(core::iter::repeat(placeholder).take(text[start..end].chars().count()));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Convenience wrapper over tuples.
pub fn mask_ranges(text: &str, ranges: &[(usize, usize)], placeholder: char) -> String {
    let spans: Vec<Interval> = ranges.iter().map(|&(s, e)| Interval::new(s, e)).collect();
    mask_spans(text, &spans, placeholder)
}
