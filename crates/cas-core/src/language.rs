//! # Language Dimension
//!
//! The closed language enumeration. Every rendered screen, every stored
//! registration, and every confirmation SMS carries one of these values.
//! English is the system default until a subscriber explicitly chooses.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Subscriber-facing language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English — the system default.
    #[default]
    En,
    /// Kiswahili.
    Sw,
}

impl Language {
    /// The two-letter code stored in registrations ("en" / "sw").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sw => "sw",
        }
    }

    /// Resolve the language-selection menu digit ("1" → English,
    /// "2" → Kiswahili). Any other digit is not a language choice.
    pub fn from_menu_digit(digit: &str) -> Option<Self> {
        match digit {
            "1" => Some(Self::En),
            "2" => Some(Self::Sw),
            _ => None,
        }
    }

    /// Parse a stored two-letter code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownLanguage`] for anything other than
    /// "en" or "sw".
    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        match code {
            "en" => Ok(Self::En),
            "sw" => Ok(Self::Sw),
            other => Err(ValidationError::UnknownLanguage {
                code: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn menu_digits_resolve() {
        assert_eq!(Language::from_menu_digit("1"), Some(Language::En));
        assert_eq!(Language::from_menu_digit("2"), Some(Language::Sw));
        assert_eq!(Language::from_menu_digit("3"), None);
        assert_eq!(Language::from_menu_digit(""), None);
    }

    #[test]
    fn code_round_trip() {
        assert_eq!(Language::from_code("en").unwrap(), Language::En);
        assert_eq!(Language::from_code("sw").unwrap(), Language::Sw);
        assert_eq!(Language::Sw.as_str(), "sw");
        assert!(Language::from_code("fr").is_err());
    }
}
