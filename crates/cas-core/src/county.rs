//! # County Catalog
//!
//! The fixed, ordered catalog of counties a subscriber can register for.
//! Each entry carries a stable numeric menu code ("1".."8"), an internal
//! storage key used for alert queries, and a per-language display label.
//!
//! ## Ordering
//!
//! [`County::ALL`] is declared in numeric-code order and every consumer
//! (menu rendering, pagination slicing) iterates it in that order. Codes
//! compare numerically, never lexicographically — a future "10" must sort
//! after "9", not between "1" and "2".

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::language::Language;

/// A county in the alert coverage area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum County {
    Busia,
    Kisumu,
    Garissa,
    Turkana,
    Marsabit,
    Makueni,
    Nairobi,
    Kilifi,
}

impl County {
    /// Every county, in numeric-code order. This order is load-bearing:
    /// it drives menu rendering and pagination slice bounds.
    pub const ALL: [County; 8] = [
        County::Busia,
        County::Kisumu,
        County::Garissa,
        County::Turkana,
        County::Marsabit,
        County::Makueni,
        County::Nairobi,
        County::Kilifi,
    ];

    /// The stable numeric menu code for this county.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Busia => "1",
            Self::Kisumu => "2",
            Self::Garissa => "3",
            Self::Turkana => "4",
            Self::Marsabit => "5",
            Self::Makueni => "6",
            Self::Nairobi => "7",
            Self::Kilifi => "8",
        }
    }

    /// The internal storage key used in registrations and alert queries.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Busia => "busia",
            Self::Kisumu => "kisumu",
            Self::Garissa => "garissa",
            Self::Turkana => "turkana",
            Self::Marsabit => "marsabit",
            Self::Makueni => "makueni",
            Self::Nairobi => "nairobi",
            Self::Kilifi => "kilifi",
        }
    }

    /// The display label in the given language.
    ///
    /// County names are proper nouns and currently identical across
    /// languages, but the label is still looked up per language so a
    /// future locale can diverge without touching call sites.
    pub fn display_name(&self, _language: Language) -> &'static str {
        match self {
            Self::Busia => "Busia",
            Self::Kisumu => "Kisumu",
            Self::Garissa => "Garissa",
            Self::Turkana => "Turkana",
            Self::Marsabit => "Marsabit",
            Self::Makueni => "Makueni",
            Self::Nairobi => "Nairobi",
            Self::Kilifi => "Kilifi",
        }
    }

    /// Resolve a menu digit to a county. An empty or unknown digit is not
    /// a county selection.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Parse an internal storage key back into a county.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownCounty`] for keys outside the catalog.
    pub fn from_key(key: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == key)
            .ok_or_else(|| ValidationError::UnknownCounty {
                code: key.to_string(),
            })
    }
}

impl std::fmt::Display for County {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
