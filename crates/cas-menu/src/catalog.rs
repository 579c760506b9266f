//! # Screen Catalog
//!
//! Maps (language, screen key) to localized template text and performs
//! named `{placeholder}` substitution.
//!
//! ## Missing-substitution contract
//!
//! Template formatting is total: a placeholder with no matching
//! substitution is left verbatim in the output and a warning is emitted
//! to the log. A malformed or incomplete catalog must never turn into a
//! subscriber-visible fault — the protocol has no error screen.

use cas_core::Language;

/// Every screen or text fragment the USSD service can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKey {
    /// Initial language-selection menu.
    LanguageSelection,
    /// Top-level menu: register / risk status / unsubscribe.
    MainMenu,
    /// Header line of the county-selection menu.
    CountySelectionHeader,
    /// Terminal registration success screen. Substitutes `{county}`.
    RegistrationSuccess,
    /// Confirmation SMS body sent after registration. Substitutes `{county}`.
    RegistrationConfirmation,
    /// Terminal screen when registration storage fails.
    RegistrationError,
    /// Terminal screen for an out-of-catalog county code on the legacy path.
    InvalidCounty,
    /// Terminal screen when no approved alert exists. Substitutes `{county}`.
    NoAlerts,
    /// Header of the risk-status screen. Substitutes `{county}`.
    RiskStatusTitle,
    /// Back-to-menu control shown under an alert.
    BackToMenu,
    /// Terminal screen for a risk query without registration.
    RegisterFirst,
    /// Terminal unsubscribe confirmation.
    Unsubscribed,
    /// Terminal screen when unsubscribe storage fails.
    UnsubscribeError,
    /// Re-prompt fragment for unrecognized input.
    InvalidOption,
    /// "0. Back" navigation control.
    BackOption,
    /// "00. Main menu" navigation control.
    MainMenuOption,
    /// "98. More counties" pagination control.
    MoreOption,
    /// "99. Change language" navigation control.
    LanguageOption,
}

/// Look up the raw template for (language, key).
fn template(language: Language, key: ScreenKey) -> &'static str {
    use ScreenKey::*;
    match language {
        Language::En => match key {
            LanguageSelection => "Select Language:\n1. English\n2. Kiswahili",
            MainMenu => {
                "Climate Alert System\n1. Register for alerts\n2. Check risk status\n3. Unsubscribe"
            }
            CountySelectionHeader => "Select County:\n",
            RegistrationSuccess => {
                "You are registered for {county} alerts.\nYou will receive SMS updates."
            }
            RegistrationConfirmation => {
                "Welcome to Climate Alert System. You are registered for {county} alerts."
            }
            RegistrationError => "Error registering. Please try again later.",
            InvalidCounty => "Invalid county selection. Please try again.",
            NoAlerts => "No current alerts for {county}.",
            RiskStatusTitle => "Latest alert for {county}:\n",
            BackToMenu => "\n1. Back to menu",
            RegisterFirst => "Please register first for alerts.",
            Unsubscribed => "You have been unsubscribed from alerts.",
            UnsubscribeError => "Error unsubscribing. Please try again.",
            InvalidOption => "Invalid option. Please try again.",
            BackOption => "0. Back",
            MainMenuOption => "00. Main menu",
            MoreOption => "98. More counties",
            LanguageOption => "99. Change language",
        },
        Language::Sw => match key {
            LanguageSelection => "Chagua Lugha:\n1. English\n2. Kiswahili",
            MainMenu => {
                "Tahadhari ya Hali ya Hewa\n1. Jisajili kwa onyo\n2. Angalia hali ya hatari\n3. Sitisha"
            }
            CountySelectionHeader => "Chagua Kaunti:\n",
            RegistrationSuccess => "Umejisajili kwa onyo za {county}.\nUtapokea ujumbe wa SMS.",
            RegistrationConfirmation => {
                "Karibu katika Mfumo wa Onyo wa Tabia Nchi. Umejisajili kwa onyo za {county}."
            }
            RegistrationError => "Hitilafu katika kusajili. Tafadhali jaribu tena baadaye.",
            InvalidCounty => "Chaguo la kaunti si sahihi. Tafadhali jaribu tena.",
            NoAlerts => "Hakuna onyo la sasa kwa {county}.",
            RiskStatusTitle => "Onyo la mwisho kwa {county}:\n",
            BackToMenu => "\n1. Rudi katika menyu",
            RegisterFirst => "Tafadhali jisajili kwanza kwa onyo.",
            Unsubscribed => "Umesitisha kupokea onyo.",
            UnsubscribeError => "Hitilafu katika kusitisha. Tafadhali jaribu tena.",
            InvalidOption => "Chaguo si sahihi. Tafadhali jaribu tena.",
            BackOption => "0. Rudi",
            MainMenuOption => "00. Menyu Kuu",
            MoreOption => "98. Kaunti zaidi",
            LanguageOption => "99. Badilisha lugha",
        },
    }
}

/// Render the localized text for `key`, substituting `{name}` placeholders
/// from `substitutions`.
///
/// Placeholders without a matching substitution are preserved verbatim and
/// logged — never an error, never a panic.
pub fn text(language: Language, key: ScreenKey, substitutions: &[(&str, &str)]) -> String {
    format_named(template(language, key), substitutions, language, key)
}

/// Substitute `{name}` placeholders in `template` from `substitutions`.
///
/// A single left-to-right scan; `{` without a closing `}` on the same
/// template is copied through untouched.
fn format_named(
    template: &str,
    substitutions: &[(&str, &str)],
    language: Language,
    key: ScreenKey,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let name = &after_open[..close];
                match substitutions.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        tracing::warn!(
                            placeholder = name,
                            language = language.as_str(),
                            screen = ?key,
                            "missing substitution for screen template, leaving placeholder verbatim"
                        );
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                // Unbalanced brace: copy the remainder through as-is.
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
