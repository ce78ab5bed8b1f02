//! Normalization categories.
//!
//! A category names one obfuscation technique. Each category owns its own
//! token table and compiled matcher, and occupies a slot in the processing
//! order: later categories see the output of earlier ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LexguardError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    /// Pictographic look-alikes such as enclosed or regional-indicator letters.
    Emoji,
    /// Homoglyphs from other scripts and symbol sets.
    Confusable,
    /// Zero-width and other invisible separators.
    Invisible,
    /// Textual emoticons built from punctuation.
    Emoticon,
    /// Digit-for-letter substitutions.
    Number,
    Custom(String),
}

impl Category {
    /// Built-in processing order: visual symbols, then invisible separators,
    /// then textual emoticons, then numeric substitutions.
    pub const DEFAULT_ORDER: [Category; 5] = [
        Category::Emoji,
        Category::Confusable,
        Category::Invisible,
        Category::Emoticon,
        Category::Number,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Emoji => "emoji",
            Category::Confusable => "confusable",
            Category::Invisible => "invisible",
            Category::Emoticon => "emoticon",
            Category::Number => "number",
            Category::Custom(name) => name,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Category::Custom(name.into())
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Category::Custom(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LexguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_lowercase().as_str() {
            "" => Err(LexguardError::validation("category name must not be empty")),
            "emoji" => Ok(Category::Emoji),
            "confusable" => Ok(Category::Confusable),
            "invisible" => Ok(Category::Invisible),
            "emoticon" => Ok(Category::Emoticon),
            "number" => Ok(Category::Number),
            _ => Ok(Category::Custom(name.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = LexguardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}
