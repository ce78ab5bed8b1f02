//! ruleset.rs - Declarative rule-set documents.
//!
//! A [`RuleSet`] is the serde form of a batch of registry operations. It has an
//! `add` section (series, ranges, parallels and the three kinds of link
//! products) and a `remove` section applied afterwards. Documents are YAML, or
//! JSON when the file name ends in `.json`; the built-in default is embedded
//! in the binary.
//!
//! ```yaml
//! add:
//!   series:
//!     - { category: number, replace_value: e, tokens: ["3"] }
//!   ranges:
//!     - { category: invisible, replace_value: _, range: [8203, 8205] }
//! remove:
//!   series:
//!     - { category: number, tokens: ["3"] }
//! ```
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::category::Category;
use crate::errors::{LexguardError, Result};
use crate::registry::{LinkMode, RuleRegistry};

/// One end of a codepoint range, either as the character itself or as a number.
///
/// In YAML, digit characters must be quoted to be read as characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodepointBound {
    Char(char),
    Codepoint(u32),
}

impl CodepointBound {
    pub fn codepoint(self) -> u32 {
        match self {
            CodepointBound::Char(c) => c as u32,
            CodepointBound::Codepoint(n) => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRule {
    pub category: Category,
    #[serde(alias = "replaceValue")]
    pub replace_value: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRule {
    pub category: Category,
    #[serde(alias = "replaceValue")]
    pub replace_value: String,
    /// Inclusive bounds.
    pub range: [CodepointBound; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelRule {
    pub category: Category,
    #[serde(alias = "replaceValues")]
    pub replace_values: Vec<String>,
    pub tokens: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRule {
    pub category: Category,
    #[serde(alias = "replaceValue")]
    pub replace_value: String,
    /// Factors, each a list of alternatives.
    pub links: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSection {
    pub unidirectional: Vec<LinkRule>,
    pub bidirectional: Vec<LinkRule>,
    pub mirror: Vec<LinkRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddSection {
    pub series: Vec<SeriesRule>,
    pub ranges: Vec<RangeRule>,
    pub parallels: Vec<ParallelRule>,
    pub links: LinkSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRule {
    pub category: Category,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoveSection {
    pub series: Vec<RemoveRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub add: AddSection,
    pub remove: RemoveSection,
}

impl RuleSet {
    /// The rule set embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default rule set from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let rules = Self::from_yaml_str(default_yaml)?;
        debug!("Loaded {} default rule record(s).", rules.record_count());
        Ok(rules)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yml::from_str(text)
            .map_err(|e| LexguardError::config_load(format!("failed to parse rule set: {}", e)))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| LexguardError::config_load(format!("failed to parse rule set: {}", e)))
    }

    /// Reads a rule set from disk; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rule set from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
            LexguardError::config_load(format!("failed to read {}: {}", path.display(), e))
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let parsed: std::result::Result<Self, String> = if is_json {
            serde_json::from_str(&text).map_err(|e| e.to_string())
        } else {
            serde_yml::from_str(&text).map_err(|e| e.to_string())
        };
        parsed.map_err(|e| {
            LexguardError::config_load(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Number of records across all sections.
    pub fn record_count(&self) -> usize {
        let links = &self.add.links;
        self.add.series.len()
            + self.add.ranges.len()
            + self.add.parallels.len()
            + links.unidirectional.len()
            + links.bidirectional.len()
            + links.mirror.len()
            + self.remove.series.len()
    }

    /// Runs every record against `registry`: additions in section order, then removals.
    /// Errors follow the registry's policy.
    pub fn apply(&self, registry: &mut RuleRegistry) -> Result<()> {
        for rule in &self.add.series {
            registry.add_series(&rule.category, &rule.replace_value, &rule.tokens)?;
        }
        for rule in &self.add.ranges {
            let [start, end] = rule.range;
            registry.add_range(
                &rule.category,
                &rule.replace_value,
                start.codepoint(),
                end.codepoint(),
            )?;
        }
        for rule in &self.add.parallels {
            registry.add_parallel(&rule.category, &rule.replace_values, &rule.tokens)?;
        }
        let links = &self.add.links;
        for (mode, rules) in [
            (LinkMode::Unidirectional, &links.unidirectional),
            (LinkMode::Bidirectional, &links.bidirectional),
            (LinkMode::Mirror, &links.mirror),
        ] {
            for rule in rules {
                registry.add_link_product(&rule.category, &rule.replace_value, &rule.links, mode)?;
            }
        }
        for rule in &self.remove.series {
            registry.remove_mapping(&rule.category, &rule.tokens)?;
        }

        info!(
            "Applied {} rule record(s); registry now holds {} mapping(s).",
            self.record_count(),
            registry.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildOptions, ErrorPolicy};

    #[test]
    fn test_default_rule_set_parses_and_applies() {
        let rules = RuleSet::load_default().unwrap();
        assert!(rules.record_count() > 0);
        let mut registry = RuleRegistry::default();
        rules.apply(&mut registry).unwrap();
        registry.build(&BuildOptions::new()).unwrap();

        assert_eq!(registry.clean_default("h3ll0"), "hello");
        assert_eq!(registry.clean_default("b\u{200b}ad"), "bad");
        assert_eq!(registry.clean_default("ⓑⓐⓓ"), "bad");
        assert_eq!(registry.clean_default("\u{0441}\u{0430}t"), "cat");
        assert_eq!(registry.clean_default("i <3 u"), "i heart u");
    }

    #[test]
    fn test_yaml_sections_and_aliases() {
        let yaml = r#"
add:
  series:
    - { category: pig, replaceValue: o, tokens: ["0", "()"] }
  ranges:
    - { category: pig, replace_value: x, range: [a, c] }
    - { category: pig, replace_value: n, range: [48, 48] }
  parallels:
    - { category: pig, replace_values: [y, z], tokens: [["¥"], ["ƶ", "ʐ"]] }
  links:
    mirror:
      - { category: pal, replace_value: z, links: [[a], [b]] }
remove:
  series:
    - { category: pig, tokens: ["()"] }
"#;
        let rules = RuleSet::from_yaml_str(yaml).unwrap();
        assert_eq!(rules.record_count(), 6);

        let mut registry = RuleRegistry::new(ErrorPolicy {
            overwrite_duplicates: true,
            ..ErrorPolicy::default()
        });
        rules.apply(&mut registry).unwrap();
        let pig = Category::custom("pig");
        assert_eq!(registry.canonical_for(&pig, "0"), Some("n"));
        assert_eq!(registry.canonical_for(&pig, "b"), Some("x"));
        assert_eq!(registry.canonical_for(&pig, "ʐ"), Some("z"));
        assert_eq!(registry.canonical_for(&pig, "()"), None);
        assert_eq!(registry.canonical_for(&Category::custom("pal"), "aba"), Some("z"));
    }

    #[test]
    fn test_json_document() {
        let json = r#"{"add": {"series": [{"category": "number", "replaceValue": "e", "tokens": ["3"]}]}}"#;
        let rules = RuleSet::from_json_str(json).unwrap();
        assert_eq!(rules.add.series[0].replace_value, "e");
    }

    #[test]
    fn test_malformed_document_is_config_load_error() {
        let err = RuleSet::from_yaml_str("add: [1, 2").unwrap_err();
        assert!(matches!(err, LexguardError::ConfigLoad(_)));
        let err = RuleSet::load_from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, LexguardError::ConfigLoad(_)));
    }
}
