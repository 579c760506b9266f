//! # Risk Levels
//!
//! Severity classification carried by climate alerts. The USSD core only
//! displays alert text, but the level travels with every alert record and
//! is part of the durable data model.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Severity of a climate risk alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// The string representation stored alongside alerts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a stored risk level.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownRiskLevel`] for values outside the
    /// enumeration.
    pub fn from_str_value(value: &str) -> Result<Self, ValidationError> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ValidationError::UnknownRiskLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
