// lexguard/src/output.rs
//! Terminal output helpers: colored status lines and the match table.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

use lexguard_core::PhraseMatch;

/// Writes `profane` or `clean`, colored when `color` is set.
pub fn write_verdict<W: Write>(out: &mut W, profane: bool, color: bool) -> io::Result<()> {
    let word = if profane { "profane" } else { "clean" };
    match (color, profane) {
        (true, true) => writeln!(out, "{}", word.red().bold()),
        (true, false) => writeln!(out, "{}", word.green()),
        (false, _) => writeln!(out, "{}", word),
    }
}

/// Prints a warning to stderr, colored when stderr is a terminal.
pub fn warn_msg(msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    let mut stderr = io::stderr();
    let _ = if stderr.is_terminal() {
        writeln!(stderr, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(stderr, "warning: {}", msg)
    };
}

/// A table of matches, one row per match, keyed by input line.
pub fn match_table(rows: &[(usize, PhraseMatch<u32>)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Line", "Phrase", "Category", "Start", "End"]);
    for (line, m) in rows {
        table.add_row(vec![
            line.to_string(),
            m.phrase.clone(),
            m.category.to_string(),
            m.start.to_string(),
            m.end.to_string(),
        ]);
    }
    table
}
