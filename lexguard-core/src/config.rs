//! Configuration management for `lexguard-core`.
//!
//! This module defines the user-facing settings document ([`FilterSettings`]),
//! the immutable, validated configuration produced from it ([`FilterConfig`]),
//! and the smaller option types handed to individual components: the error
//! policy shared by every mutating call, per-category matcher options, and
//! the scanner configuration.
//!
//! Settings are plain serde structs so they can be read from YAML; nothing is
//! validated until [`FilterSettings::build`] runs, and nothing is mutated after.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::errors::{LexguardError, Result};

/// Placeholder used when none (or an empty one) is configured.
pub const DEFAULT_PLACEHOLDER: char = '*';
/// Token separator used by the scanner unless configured otherwise.
pub const DEFAULT_SEPARATOR: char = ' ';
/// Widest n-gram the scanner considers unless configured otherwise.
pub const DEFAULT_MAX_WINDOW: usize = 6;

/// Which violations are raised and which are silently skipped.
///
/// A skipped violation drops only the offending element; the rest of the
/// batch is still applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPolicy {
    /// Skip empty or malformed tokens and phrases instead of failing.
    pub disable_throw_on_type_error: bool,
    /// Skip tokens already mapped to a different canonical value instead of failing.
    pub disable_throw_on_duplicate_add: bool,
    /// Skip removals of absent tokens and phrases instead of failing.
    pub disable_throw_on_missing_remove: bool,
    /// Skip the default rule set when it is missing or malformed.
    pub disable_throw_on_config_load: bool,
    /// Let a token be remapped to a new canonical value. Takes precedence over
    /// `disable_throw_on_duplicate_add`.
    pub overwrite_duplicates: bool,
}

impl ErrorPolicy {
    /// Every violation is skipped.
    pub fn permissive() -> Self {
        Self {
            disable_throw_on_type_error: true,
            disable_throw_on_duplicate_add: true,
            disable_throw_on_missing_remove: true,
            disable_throw_on_config_load: true,
            overwrite_duplicates: false,
        }
    }

    /// Returns `err`, unless this policy downgrades it to a skip.
    pub fn suppress(&self, err: LexguardError) -> Result<()> {
        let skip = match &err {
            LexguardError::Validation(_) => self.disable_throw_on_type_error,
            LexguardError::DuplicateMapping { .. } => self.disable_throw_on_duplicate_add,
            LexguardError::NotFound { .. } => self.disable_throw_on_missing_remove,
            LexguardError::ConfigLoad(_) => self.disable_throw_on_config_load,
            _ => false,
        };
        if skip {
            debug!("Skipping: {}", err);
            Ok(())
        } else {
            Err(err)
        }
    }
}

/// How single-codepoint tokens are grouped when compiling a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enforce {
    /// Single-codepoint tokens always go into one character class.
    Brackets,
    /// Single-codepoint tokens are only grouped into a class in wildcard mode.
    #[default]
    Separators,
}

/// What a match is replaced with during `clean`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    #[default]
    Replace,
    Delete,
}

/// Engine backing a compiled matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherBackend {
    #[default]
    Regex,
    /// Aho-Corasick automaton. Only honoured for wildcard, case-sensitive categories.
    Automaton,
}

/// Pattern flags in the familiar single-letter form (`"gi"`, `"iu"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

impl RegexFlags {
    /// `g` and `u` are accepted and ignored: replacement is always global and
    /// patterns are always Unicode-aware.
    pub fn parse(flags: &str) -> Result<Self> {
        let mut parsed = RegexFlags::default();
        for flag in flags.chars() {
            match flag {
                'g' | 'u' => {}
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_matches_new_line = true,
                other => {
                    return Err(LexguardError::validation(format!(
                        "unsupported matcher flag '{}' in '{}'",
                        other, flags
                    )))
                }
            }
        }
        Ok(parsed)
    }
}

/// Compilation options for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOptions {
    pub flags: String,
    /// Match tokens anywhere, without word-boundary checks.
    pub wildcard: bool,
    pub enforce: Enforce,
    pub action: MatchAction,
    pub backend: MatcherBackend,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self {
            flags: String::new(),
            wildcard: false,
            enforce: Enforce::Separators,
            action: MatchAction::Replace,
            backend: MatcherBackend::Regex,
        }
    }
}

impl CategoryOptions {
    /// Defaults tuned to each built-in category. Custom categories get word-bounded
    /// alternations.
    pub fn default_for(category: &Category) -> Self {
        let wild = CategoryOptions {
            wildcard: true,
            enforce: Enforce::Brackets,
            ..CategoryOptions::default()
        };
        match category {
            Category::Emoji | Category::Confusable | Category::Number => wild,
            Category::Invisible => CategoryOptions {
                action: MatchAction::Delete,
                ..wild
            },
            Category::Emoticon | Category::Custom(_) => CategoryOptions::default(),
        }
    }

    pub fn regex_flags(&self) -> Result<RegexFlags> {
        RegexFlags::parse(&self.flags)
    }
}

/// Partial [`CategoryOptions`] as written in a settings file; unset fields
/// fall back to the category's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOverrides {
    pub flags: Option<String>,
    pub wildcard: Option<bool>,
    pub enforce: Option<Enforce>,
    pub action: Option<MatchAction>,
    pub backend: Option<MatcherBackend>,
}

impl CategoryOverrides {
    pub fn apply_to(&self, mut base: CategoryOptions) -> CategoryOptions {
        if let Some(flags) = &self.flags {
            base.flags = flags.clone();
        }
        if let Some(wildcard) = self.wildcard {
            base.wildcard = wildcard;
        }
        if let Some(enforce) = self.enforce {
            base.enforce = enforce;
        }
        if let Some(action) = self.action {
            base.action = action;
        }
        if let Some(backend) = self.backend {
            base.backend = backend;
        }
        base
    }
}

/// Per-category options for a `build` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    categories: HashMap<Category, CategoryOptions>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, options: CategoryOptions) -> Self {
        self.categories.insert(category, options);
        self
    }

    /// Explicit options for `category`, or its defaults.
    pub fn options_for(&self, category: &Category) -> CategoryOptions {
        self.categories
            .get(category)
            .cloned()
            .unwrap_or_else(|| CategoryOptions::default_for(category))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (category, options) in &self.categories {
            options.regex_flags().map_err(|e| {
                LexguardError::validation(format!("category '{}': {}", category, e))
            })?;
        }
        Ok(())
    }
}

/// Scanner configuration. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    separator: char,
    max_window: NonZeroUsize,
    placeholder: char,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            max_window: NonZeroUsize::new(DEFAULT_MAX_WINDOW).unwrap_or(NonZeroUsize::MIN),
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

impl ScanConfig {
    pub fn new(separator: char, max_window: NonZeroUsize, placeholder: char) -> Self {
        Self {
            separator,
            max_window,
            placeholder,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn max_window(&self) -> usize {
        self.max_window.get()
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }
}

/// User-facing settings. Every field has a default, so an empty document is valid.
///
/// The `with_*` methods make this usable as a by-value builder:
///
/// ```rust
/// use lexguard_core::FilterSettings;
///
/// let config = FilterSettings::default()
///     .with_placeholder("#")
///     .with_max_window(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.scan().placeholder(), '#');
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Only the first character is used.
    pub placeholder: Option<String>,
    pub separator: Option<String>,
    pub max_window: Option<usize>,
    pub errors: ErrorPolicy,
    pub categories: HashMap<Category, CategoryOverrides>,
    pub order: Option<Vec<Category>>,
    /// Memoize canonical forms of repeated inputs.
    pub use_interning: bool,
    pub intern_capacity: Option<usize>,
    /// Canonicalize blacklist and whitelist phrases before storing them.
    pub clean_lists: bool,
    pub load_default_rules: bool,
    /// Rule set to load instead of the embedded default.
    pub rule_set_path: Option<PathBuf>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            placeholder: None,
            separator: None,
            max_window: None,
            errors: ErrorPolicy::default(),
            categories: HashMap::new(),
            order: None,
            use_interning: true,
            intern_capacity: None,
            clean_lists: true,
            load_default_rules: true,
            rule_set_path: None,
        }
    }
}

impl FilterSettings {
    /// Loads settings from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading filter settings from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
            LexguardError::config_load(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_yml::from_str(&text).map_err(|e| {
            LexguardError::config_load(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yml::from_str(text)
            .map_err(|e| LexguardError::config_load(format!("failed to parse settings: {}", e)))
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator.to_string());
        self
    }

    pub fn with_max_window(mut self, max_window: usize) -> Self {
        self.max_window = Some(max_window);
        self
    }

    pub fn with_errors(mut self, errors: ErrorPolicy) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_category(mut self, category: Category, overrides: CategoryOverrides) -> Self {
        self.categories.insert(category, overrides);
        self
    }

    pub fn with_order(mut self, order: Vec<Category>) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_interning(mut self, enabled: bool) -> Self {
        self.use_interning = enabled;
        self
    }

    pub fn with_intern_capacity(mut self, capacity: usize) -> Self {
        self.intern_capacity = Some(capacity);
        self
    }

    pub fn with_clean_lists(mut self, enabled: bool) -> Self {
        self.clean_lists = enabled;
        self
    }

    pub fn with_default_rules(mut self, enabled: bool) -> Self {
        self.load_default_rules = enabled;
        self
    }

    pub fn with_rule_set_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rule_set_path = Some(path.into());
        self
    }

    /// Validates the settings and freezes them into a [`FilterConfig`].
    pub fn build(self) -> Result<FilterConfig> {
        let placeholder = self
            .placeholder
            .as_deref()
            .and_then(|p| p.chars().next())
            .unwrap_or(DEFAULT_PLACEHOLDER);

        let separator = match self.separator.as_deref() {
            None => DEFAULT_SEPARATOR,
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(LexguardError::validation(format!(
                            "separator must be exactly one character, got {:?}",
                            s
                        )))
                    }
                }
            }
        };

        let max_window = NonZeroUsize::new(self.max_window.unwrap_or(DEFAULT_MAX_WINDOW))
            .ok_or_else(|| LexguardError::validation("max_window must be at least 1"))?;

        let intern_capacity = match self.intern_capacity {
            None => None,
            Some(capacity) => Some(
                NonZeroUsize::new(capacity)
                    .ok_or_else(|| LexguardError::validation("intern_capacity must be at least 1"))?,
            ),
        };

        if let Some(order) = &self.order {
            let mut seen = HashSet::new();
            for category in order {
                if !seen.insert(category) {
                    return Err(LexguardError::validation(format!(
                        "category '{}' appears more than once in order",
                        category
                    )));
                }
            }
        }

        let mut build = BuildOptions::new();
        for (category, overrides) in &self.categories {
            let options = overrides.apply_to(CategoryOptions::default_for(category));
            build = build.with(category.clone(), options);
        }
        build.validate()?;

        debug!(
            "Filter settings validated: separator={:?}, max_window={}, placeholder={:?}, {} category override(s).",
            separator,
            max_window,
            placeholder,
            self.categories.len()
        );

        Ok(FilterConfig {
            scan: ScanConfig::new(separator, max_window, placeholder),
            errors: self.errors,
            build,
            order: self.order,
            use_interning: self.use_interning,
            intern_capacity,
            clean_lists: self.clean_lists,
            load_default_rules: self.load_default_rules,
            rule_set_path: self.rule_set_path,
        })
    }
}

/// Validated, immutable filter configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    scan: ScanConfig,
    errors: ErrorPolicy,
    build: BuildOptions,
    order: Option<Vec<Category>>,
    use_interning: bool,
    intern_capacity: Option<NonZeroUsize>,
    clean_lists: bool,
    load_default_rules: bool,
    rule_set_path: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            errors: ErrorPolicy::default(),
            build: BuildOptions::default(),
            order: None,
            use_interning: true,
            intern_capacity: None,
            clean_lists: true,
            load_default_rules: true,
            rule_set_path: None,
        }
    }
}

impl FilterConfig {
    pub fn builder() -> FilterSettings {
        FilterSettings::default()
    }

    pub fn scan(&self) -> &ScanConfig {
        &self.scan
    }

    pub fn errors(&self) -> ErrorPolicy {
        self.errors
    }

    pub fn build_options(&self) -> &BuildOptions {
        &self.build
    }

    /// Explicit processing order, if one was configured.
    pub fn order(&self) -> Option<&[Category]> {
        self.order.as_deref()
    }

    pub fn use_interning(&self) -> bool {
        self.use_interning
    }

    pub fn intern_capacity(&self) -> Option<NonZeroUsize> {
        self.intern_capacity
    }

    pub fn clean_lists(&self) -> bool {
        self.clean_lists
    }

    pub fn load_default_rules(&self) -> bool {
        self.load_default_rules
    }

    pub fn rule_set_path(&self) -> Option<&Path> {
        self.rule_set_path.as_deref()
    }
}

/// Blacklisted phrases sharing one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistGroup<C> {
    pub category: C,
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// Phrase lists as written in a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct PhraseLists<C> {
    #[serde(default)]
    pub blacklist: Vec<BlacklistGroup<C>>,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl<C> Default for PhraseLists<C> {
    fn default() -> Self {
        Self {
            blacklist: Vec::new(),
            whitelist: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterSettings::default().build().unwrap();
        assert_eq!(config.scan().placeholder(), '*');
        assert_eq!(config.scan().separator(), ' ');
        assert_eq!(config.scan().max_window(), 6);
        assert!(config.use_interning());
        assert!(config.clean_lists());
        assert!(config.load_default_rules());
    }

    #[test]
    fn test_placeholder_takes_first_char() {
        let config = FilterSettings::default().with_placeholder("#!").build().unwrap();
        assert_eq!(config.scan().placeholder(), '#');
        let config = FilterSettings::default().with_placeholder("").build().unwrap();
        assert_eq!(config.scan().placeholder(), '*');
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(FilterSettings::default().with_max_window(0).build().is_err());
        assert!(FilterSettings::default().with_intern_capacity(0).build().is_err());

        let mut settings = FilterSettings::default();
        settings.separator = Some("--".to_string());
        assert!(matches!(settings.build(), Err(LexguardError::Validation(_))));

        let settings = FilterSettings::default()
            .with_order(vec![Category::Number, Category::Emoji, Category::Number]);
        assert!(settings.build().is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let settings = FilterSettings::default().with_category(
            Category::Emoticon,
            CategoryOverrides {
                flags: Some("gx".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(settings.build(), Err(LexguardError::Validation(_))));
    }

    #[test]
    fn test_overrides_keep_category_defaults() {
        let settings = FilterSettings::from_yaml_str(
            r#"
categories:
  number:
    flags: "gi"
  leet:
    wildcard: true
"#,
        )
        .unwrap();
        let config = settings.build().unwrap();
        let number = config.build_options().options_for(&Category::Number);
        assert!(number.wildcard);
        assert_eq!(number.enforce, Enforce::Brackets);
        assert!(number.regex_flags().unwrap().case_insensitive);

        let leet = config.build_options().options_for(&Category::custom("leet"));
        assert!(leet.wildcard);
        assert_eq!(leet.enforce, Enforce::Separators);

        let invisible = config.build_options().options_for(&Category::Invisible);
        assert_eq!(invisible.action, MatchAction::Delete);
    }

    #[test]
    fn test_regex_flags_parse() {
        let flags = RegexFlags::parse("gims").unwrap();
        assert!(flags.case_insensitive && flags.multi_line && flags.dot_matches_new_line);
        assert!(RegexFlags::parse("q").is_err());
    }
}
