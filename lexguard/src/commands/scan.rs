//! `lexguard scan`

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

use lexguard_core::{Filter, PhraseMatch};

use crate::output::match_table;

/// A match as printed by `scan --json`.
#[derive(Debug, Serialize)]
struct MatchRecord<'a> {
    line: usize,
    #[serde(flatten)]
    found: &'a PhraseMatch<u32>,
}

/// Matches per line, with 1-based line numbers. Offsets refer to the
/// normalized line.
pub fn collect_matches(filter: &Filter, input: &str) -> Vec<(usize, PhraseMatch<u32>)> {
    input
        .lines()
        .enumerate()
        .flat_map(|(i, line)| filter.scan(line).into_iter().map(move |m| (i + 1, m)))
        .collect()
}

pub fn run_scan(filter: &Filter, input: &str, json: bool) -> Result<usize> {
    let rows = collect_matches(filter, input);
    let mut out = io::stdout().lock();
    if json {
        for (line, found) in &rows {
            let record = MatchRecord { line: *line, found };
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        }
    } else if rows.is_empty() {
        writeln!(out, "No matches.")?;
    } else {
        writeln!(out, "{}", match_table(&rows))?;
    }
    out.flush()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexguard_core::FilterConfig;

    #[test_log::test]
    fn test_scan_numbers_lines_from_one() {
        let mut f: Filter = Filter::new(FilterConfig::default()).unwrap();
        f.blacklist(4, ["bad"]).unwrap();
        let rows = collect_matches(&f, "fine\nso b4d\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, 2);
        assert_eq!(rows[0].1.category, 4);
        assert_eq!((rows[0].1.start, rows[0].1.end), (3, 6));
    }

    #[test]
    fn test_json_record_flattens_match() {
        let found = PhraseMatch {
            phrase: "bad".to_string(),
            category: 4u32,
            start: 3,
            end: 6,
            tokens: 1,
        };
        let json = serde_json::to_string(&MatchRecord { line: 2, found: &found }).unwrap();
        assert_eq!(
            json,
            r#"{"line":2,"phrase":"bad","category":4,"start":3,"end":6,"tokens":1}"#
        );
    }
}
