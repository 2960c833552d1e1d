// File: src/input_class.rs
// Purpose: Input classes and their compiled patterns

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

static ALPHABETIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z ]+$").unwrap());

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+$").unwrap());

// Scheme, one or more `label.` groups, a final label, then an optional path
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://([\w-]+\.)+[\w-]+(/[\w\- ./?%&=]*)?$").unwrap()
});

/// Format category a field's value must belong to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputClass {
    Numeric,
    Alphanumeric,
    Alphabetic,
    Email,
    Url,
    #[default]
    Any,
}

impl InputClass {
    /// Check a string representation against this class
    ///
    /// `Any` accepts everything; every other class rejects the empty string.
    pub fn matches(self, value: &str) -> bool {
        match self {
            InputClass::Numeric => NUMERIC_REGEX.is_match(value),
            InputClass::Alphanumeric => ALPHANUMERIC_REGEX.is_match(value),
            InputClass::Alphabetic => ALPHABETIC_REGEX.is_match(value),
            InputClass::Email => EMAIL_REGEX.is_match(value),
            InputClass::Url => URL_REGEX.is_match(value),
            InputClass::Any => true,
        }
    }

    pub const fn is_any(self) -> bool {
        matches!(self, InputClass::Any)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            InputClass::Numeric => "numeric",
            InputClass::Alphanumeric => "alphanumeric",
            InputClass::Alphabetic => "alphabetic",
            InputClass::Email => "email",
            InputClass::Url => "url",
            InputClass::Any => "any",
        }
    }
}

impl fmt::Display for InputClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised input class name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown input class `{0}` (expected numeric, alphanumeric, alphabetic, email, url or any)")]
pub struct UnknownInputClass(pub String);

impl FromStr for InputClass {
    type Err = UnknownInputClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "numeric" => Ok(InputClass::Numeric),
            "alphanumeric" => Ok(InputClass::Alphanumeric),
            "alphabetic" => Ok(InputClass::Alphabetic),
            "email" => Ok(InputClass::Email),
            "url" => Ok(InputClass::Url),
            "any" => Ok(InputClass::Any),
            _ => Err(UnknownInputClass(s.to_string())),
        }
    }
}

// Names are matched case-insensitively, as in `#[validate(input = "...")]`
impl<'de> Deserialize<'de> for InputClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
