//! # Navigation Path Parsing
//!
//! The gateway accumulates every digit the subscriber has ever sent in
//! this session into one delimiter-joined string. This module splits it
//! into discrete steps.
//!
//! Parsing is total: any string is valid input. A path of only delimiters
//! yields empty-string steps, which never match a menu code and therefore
//! route to the fallback re-prompt downstream.

/// The step delimiter used by the USSD gateway.
pub const STEP_DELIMITER: char = '*';

/// An ordered sequence of navigation steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPath {
    steps: Vec<String>,
}

impl NavigationPath {
    /// Parse an accumulated path with the standard gateway delimiter.
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, STEP_DELIMITER)
    }

    /// Parse an accumulated path on an explicit delimiter. Empty input
    /// yields an empty step list — a first contact, not an empty step.
    pub fn parse_with(text: &str, delimiter: char) -> Self {
        let steps = if text.is_empty() {
            Vec::new()
        } else {
            text.split(delimiter).map(str::to_string).collect()
        };
        Self { steps }
    }

    /// All steps in order.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The step at `index`, if present.
    pub fn step(&self, index: usize) -> Option<&str> {
        self.steps.get(index).map(String::as_str)
    }

    /// The final step — the digit the subscriber just entered.
    pub fn last(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this is a first contact (empty accumulated path).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
