//! `lexguard normalize`

use anyhow::Result;
use std::io::{self, Write};

use lexguard_core::Filter;

pub fn run_normalize(filter: &Filter, input: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    for line in input.lines() {
        writeln!(out, "{}", filter.normalize(line))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexguard_core::FilterConfig;

    #[test_log::test]
    fn test_normalize_writes_each_line() {
        let f: Filter = Filter::new(FilterConfig::default()).unwrap();
        assert_eq!(f.normalize("h3ll0"), "hello");
        run_normalize(&f, "h3ll0\nok\n").unwrap();
    }
}
