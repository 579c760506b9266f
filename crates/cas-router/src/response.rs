//! # Protocol Responses
//!
//! The two-valued USSD reply: `CON` keeps the session open and renders
//! another screen, `END` closes it with a terminal message.

/// A rendered USSD reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UssdResponse {
    /// Session continues; the gateway shows the screen and awaits input.
    Con(String),
    /// Session terminates with a final message.
    End(String),
}

impl UssdResponse {
    /// The wire form sent back to the gateway (`CON …` / `END …`).
    pub fn render(&self) -> String {
        match self {
            Self::Con(screen) => format!("CON {screen}"),
            Self::End(message) => format!("END {message}"),
        }
    }

    /// Whether this reply closes the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End(_))
    }

    /// The screen text without the protocol prefix.
    pub fn screen(&self) -> &str {
        match self {
            Self::Con(s) | Self::End(s) => s,
        }
    }
}

impl std::fmt::Display for UssdResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn con_renders_with_prefix() {
        let reply = UssdResponse::Con("Select Language:".to_string());
        assert_eq!(reply.render(), "CON Select Language:");
        assert!(!reply.is_terminal());
    }

    #[test]
    fn end_renders_with_prefix() {
        let reply = UssdResponse::End("Goodbye".to_string());
        assert_eq!(reply.render(), "END Goodbye");
        assert!(reply.is_terminal());
        assert_eq!(reply.screen(), "Goodbye");
    }
}
