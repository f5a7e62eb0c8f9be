//! Identifier naming conventions.
//!
//! Entry function names arrive in whatever style the source dataset used and
//! are re-spelled in the target language's convention. Tokenization splits on
//! underscores and case boundaries, so `getMax_value`, `get_max_value`, and
//! `GetMaxValue` all produce the same tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identifier convention of a target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingConvention {
    #[serde(rename = "SNAKE_CASE")]
    SnakeCase,
    #[serde(rename = "CAMEL_CASE")]
    CamelCase,
    #[serde(rename = "PASCAL_CASE")]
    PascalCase,
}

impl NamingConvention {
    /// Re-spell `name` in this convention.
    pub fn format(self, name: &str) -> String {
        let tokens = tokenize(name);
        if tokens.is_empty() {
            return String::new();
        }
        match self {
            NamingConvention::SnakeCase => tokens
                .iter()
                .map(|t| t.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
            NamingConvention::CamelCase => {
                let mut out = tokens[0].to_lowercase();
                for t in &tokens[1..] {
                    out.push_str(&title_case(t));
                }
                out
            }
            NamingConvention::PascalCase => tokens.iter().map(|t| title_case(t)).collect(),
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NamingConvention::SnakeCase => "snake_case",
            NamingConvention::CamelCase => "camelCase",
            NamingConvention::PascalCase => "PascalCase",
        };
        f.write_str(name)
    }
}

/// Split an identifier into tokens at underscores and case boundaries.
fn tokenize(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1);
        let boundary = c.is_uppercase()
            && (prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
                || next.is_some_and(|n| n.is_lowercase()));
        if boundary && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snake_from_any_style() {
        for name in ["getMaxValue", "get_max_value", "GetMaxValue", "get_Max_value"] {
            assert_eq!(NamingConvention::SnakeCase.format(name), "get_max_value");
        }
    }

    #[test]
    fn camel_from_any_style() {
        for name in ["getMaxValue", "get_max_value", "GetMaxValue"] {
            assert_eq!(NamingConvention::CamelCase.format(name), "getMaxValue");
        }
    }

    #[test]
    fn pascal_from_any_style() {
        for name in ["getMaxValue", "get_max_value", "GetMaxValue"] {
            assert_eq!(NamingConvention::PascalCase.format(name), "GetMaxValue");
        }
    }

    #[test]
    fn digits_stay_attached() {
        assert_eq!(NamingConvention::SnakeCase.format("base64Encode"), "base64_encode");
        assert_eq!(NamingConvention::CamelCase.format("sum_2_values"), "sum2Values");
    }

    #[test]
    fn acronyms_split_before_trailing_word() {
        assert_eq!(NamingConvention::SnakeCase.format("HTTPServer"), "http_server");
    }

    #[test]
    fn single_token() {
        assert_eq!(NamingConvention::CamelCase.format("identity"), "identity");
        assert_eq!(NamingConvention::PascalCase.format("identity"), "Identity");
    }
}
