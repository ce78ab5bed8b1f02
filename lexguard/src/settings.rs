// lexguard/src/settings.rs
//! Settings file handling for the CLI.
//!
//! One YAML document carries both the filter options understood by
//! `lexguard-core` and the phrase lists to load:
//!
//! ```yaml
//! placeholder: "#"
//! max_window: 3
//! blacklist:
//!   - { category: 1, phrases: ["bad word"] }
//! whitelist: ["bad word actor"]
//! ```

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use lexguard_core::{FilterSettings, PhraseLists};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(flatten)]
    pub filter: FilterSettings,
    #[serde(flatten)]
    pub phrases: PhraseLists<u32>,
}

impl CliSettings {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yml::from_str(text).context("Failed to parse settings")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }
}

/// `<config dir>/lexguard/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lexguard").join("config.yaml"))
}

/// Loads the explicit settings file, or the default one when it exists, or
/// falls back to built-in defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<CliSettings> {
    if let Some(path) = explicit {
        return CliSettings::load_from_file(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => CliSettings::load_from_file(&path),
        _ => {
            debug!("No settings file found, using defaults.");
            Ok(CliSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_filter_options_and_phrase_lists_from_one_document() {
        let settings = CliSettings::from_yaml_str(
            r##"
placeholder: "#"
max_window: 2
use_interning: false
blacklist:
  - { category: 3, phrases: ["bad", "bad word"] }
whitelist: ["bad word actor"]
"##,
        )
        .unwrap();
        assert_eq!(settings.filter.placeholder.as_deref(), Some("#"));
        assert_eq!(settings.filter.max_window, Some(2));
        assert!(!settings.filter.use_interning);
        assert!(settings.filter.load_default_rules);
        assert_eq!(settings.phrases.blacklist[0].category, 3);
        assert_eq!(settings.phrases.blacklist[0].phrases.len(), 2);
        assert_eq!(settings.phrases.whitelist, vec!["bad word actor"]);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let err = load_settings(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "whitelist: [\"fine\"]").unwrap();
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.phrases.whitelist, vec!["fine"]);
        assert!(settings.phrases.blacklist.is_empty());
    }
}
