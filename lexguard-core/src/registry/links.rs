//! links.rs - Composite token generation for link products.
//!
//! A link product takes a list of factors, each a list of alternatives, and
//! yields every concatenation that picks one alternative per factor. The first
//! factor varies slowest, so `[["a", "4"], ["b", "8"]]` yields `ab, a8, 4b, 48`.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which extra tokens a link product registers besides the plain product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    #[default]
    Unidirectional,
    /// Also the product with the factor order reversed.
    Bidirectional,
    /// Also each token extended into a palindrome: `P` + reverse of `P` minus its last char.
    Mirror,
}

/// Cartesian product of `factors`. Returns an empty list when there are no factors.
pub fn product<S: AsRef<str>>(factors: &[Vec<S>]) -> Vec<String> {
    if factors.is_empty() {
        return Vec::new();
    }
    let mut acc = vec![String::new()];
    for factor in factors {
        let mut next = Vec::with_capacity(acc.len() * factor.len());
        for prefix in &acc {
            for alternative in factor {
                let mut token = String::with_capacity(prefix.len() + alternative.as_ref().len());
                token.push_str(prefix);
                token.push_str(alternative.as_ref());
                next.push(token);
            }
        }
        acc = next;
    }
    acc
}

/// `token` followed by its own reverse without the last character.
pub fn mirror(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    chars.pop();
    let mut mirrored = String::with_capacity(token.len() * 2);
    mirrored.push_str(token);
    mirrored.extend(chars.into_iter().rev());
    mirrored
}

/// Every token a link product registers under `mode`, in generation order and
/// without duplicates.
pub fn expand<S: AsRef<str>>(factors: &[Vec<S>], mode: LinkMode) -> Vec<String> {
    let base = product(factors);
    let mut tokens = Vec::with_capacity(base.len() * 2);
    match mode {
        LinkMode::Unidirectional => tokens.extend(base),
        LinkMode::Bidirectional => {
            let reversed: Vec<Vec<&str>> = factors
                .iter()
                .rev()
                .map(|f| f.iter().map(|a| a.as_ref()).collect())
                .collect();
            tokens.extend(base);
            tokens.extend(product(&reversed));
        }
        LinkMode::Mirror => {
            for token in base {
                let mirrored = mirror(&token);
                tokens.push(token);
                tokens.push(mirrored);
            }
        }
    }

    let mut seen = HashSet::with_capacity(tokens.len());
    tokens.retain(|t| seen.insert(t.clone()));
    tokens
}
