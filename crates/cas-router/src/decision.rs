//! # Routing Decision Table
//!
//! The ordered guard/action table at the heart of the state machine.
//! [`decide`] is pure: it reads the resolved context and the parsed step
//! sequence and returns exactly one [`Decision`], with no I/O and no
//! store access — which is what makes the precedence testable in
//! isolation.
//!
//! ## Precedence (first match wins, top to bottom)
//!
//! 1. Global navigation digits, interpreted relative to the current
//!    state: change-language (`99`), jump-to-main-menu (`00`),
//!    next-page (`98`, county selection only), back (`0`).
//! 2. Language selection: a recognized language digit while on the
//!    language screen.
//! 3. County selection: a recognized county code while on the county
//!    screen — registers and terminates.
//! 4. Risk-status back digit (`1`).
//! 5. Main-menu dispatch: `1`/`2`/`3` while on the main menu.
//! 6. Legacy full-path replay: clients that send the entire accumulated
//!    path with no server-side state reach the same outcomes.
//! 7. Fallback: re-prompt the current screen. The protocol has no error
//!    screen.
//!
//! ## Replay disambiguation
//!
//! A multi-step path is ambiguous: `1*9` is either "language English,
//! then a typo on the main menu" (state-tracked) or "register, county 9"
//! (stateless client). The discriminator is navigation state: any session
//! that progressed past the language screen carries it, so the replay
//! rule only fires while the session still sits at the language-selection
//! default — the state a fresh or lost session vivifies into.

use cas_core::{County, Language};
use cas_menu::{Pagination, COUNTIES_PER_PAGE};
use cas_session::SessionState;

use crate::path::NavigationPath;

// ── Navigation control digits ───────────────────────────────────────────────

/// Back one screen (or one page within county selection).
pub const BACK_DIGIT: &str = "0";
/// Jump straight to the main menu from anywhere.
pub const MAIN_MENU_DIGIT: &str = "00";
/// Advance to the next county page (county selection only).
pub const NEXT_PAGE_DIGIT: &str = "98";
/// Return to language selection and force re-selection.
pub const CHANGE_LANGUAGE_DIGIT: &str = "99";
/// Back-to-menu control shown under a risk-status alert.
pub const RISK_BACK_DIGIT: &str = "1";

/// Main-menu choices.
const MENU_REGISTER: &str = "1";
const MENU_RISK_STATUS: &str = "2";
const MENU_UNSUBSCRIBE: &str = "3";

// ── Inputs & outputs ────────────────────────────────────────────────────────

/// Session context with the language dimension already resolved.
///
/// `language_chosen` folds the tri-state session flag together with the
/// durable registration: `Chosen` → true, `Cleared` → false (a reset must
/// not be short-circuited by a registration), `Unset` → whether an active
/// registration exists. `language_cleared` is carried separately because
/// the replay rule needs to tell "explicitly reset this session" apart
/// from "never asked" — only the latter is a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContext {
    pub language: Language,
    pub language_chosen: bool,
    pub language_cleared: bool,
    pub state: SessionState,
    pub county_page: u32,
}

impl RouteContext {
    /// A session with no language history at all: never chosen, never
    /// explicitly reset. The only context in which a multi-step path can
    /// start with a language digit.
    fn pristine(&self) -> bool {
        !self.language_chosen && !self.language_cleared
    }
}

/// What the router should do for this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Render the language-selection screen. `clear_choice` forces
    /// re-selection (the change-language control); plain back navigation
    /// keeps the existing choice.
    LanguageMenu { clear_choice: bool },
    /// Render the main menu, resetting pagination.
    MainMenu,
    /// Render the county menu at `page` (1-indexed).
    CountyMenu { page: u32 },
    /// Register the subscriber for `county` and terminate the turn.
    Register(County),
    /// Legacy full-path replay named a county code outside the catalog;
    /// terminate with the invalid-county message.
    RejectCounty,
    /// Look up and render the latest approved alert (or terminate with
    /// register-first / no-alerts).
    RiskQuery,
    /// Deactivate the registration and terminate the turn.
    Unsubscribe,
    /// Re-prompt the current screen.
    Redisplay,
}

/// The routing outcome: an optional language adoption plus one action.
///
/// `adopt_language` is set when this very step resolves the language —
/// an explicit selection on the language screen, or the language prefix
/// of a replayed legacy path. The executor persists it with the chosen
/// flag before running the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub adopt_language: Option<Language>,
    pub action: Action,
}

impl Decision {
    fn act(action: Action) -> Self {
        Self {
            adopt_language: None,
            action,
        }
    }

    fn adopt(language: Language, action: Action) -> Self {
        Self {
            adopt_language: Some(language),
            action,
        }
    }
}

// ── The table ───────────────────────────────────────────────────────────────

/// Decide the next action for one callback. Pure; first match wins.
pub fn decide(ctx: &RouteContext, path: &NavigationPath) -> Decision {
    // First contact: no steps yet.
    let Some(step) = path.last() else {
        return if ctx.language_chosen {
            Decision::act(Action::MainMenu)
        } else {
            Decision::act(Action::LanguageMenu {
                clear_choice: false,
            })
        };
    };

    // Rule 1: global navigation digits, relative to state.
    if let Some(decision) = global_navigation(ctx, step) {
        return decision;
    }

    // Rule 2: language selection on the language screen. A pristine
    // session whose path ALSO starts with a language digit defers to the
    // replay rule — the whole path is a stateless-client transcript and
    // the final digit belongs to a later screen.
    if ctx.state == SessionState::LanguageSelection {
        if let Some(language) = Language::from_menu_digit(step) {
            let defer_to_replay = ctx.pristine()
                && path.len() > 1
                && path
                    .step(0)
                    .and_then(Language::from_menu_digit)
                    .is_some();
            if !defer_to_replay {
                return Decision::adopt(language, Action::MainMenu);
            }
        }
    }

    // Rule 3: county selection on the county screen registers.
    if ctx.state == SessionState::CountySelection {
        if let Some(county) = County::from_code(step) {
            return Decision::act(Action::Register(county));
        }
    }

    // Rule 4: back-to-menu under a risk-status alert.
    if ctx.state == SessionState::RiskStatus && step == RISK_BACK_DIGIT {
        return Decision::act(Action::MainMenu);
    }

    // Rule 5: main-menu dispatch.
    if ctx.state == SessionState::MainMenu {
        match step {
            MENU_REGISTER => return Decision::act(Action::CountyMenu { page: 1 }),
            MENU_RISK_STATUS => return Decision::act(Action::RiskQuery),
            MENU_UNSUBSCRIBE => return Decision::act(Action::Unsubscribe),
            _ => {}
        }
    }

    // Rule 6: legacy full-path replay.
    if let Some(decision) = replay_full_path(ctx, path) {
        return decision;
    }

    // Rule 7: no rule matched — re-prompt, never error.
    Decision::act(Action::Redisplay)
}

/// Rule 1: the global navigation digits. Their effect depends on the
/// current state; a next-page digit outside county selection is NOT
/// navigation and falls through to the later rules.
fn global_navigation(ctx: &RouteContext, step: &str) -> Option<Decision> {
    match step {
        CHANGE_LANGUAGE_DIGIT => Some(Decision::act(Action::LanguageMenu { clear_choice: true })),
        MAIN_MENU_DIGIT => Some(Decision::act(Action::MainMenu)),
        NEXT_PAGE_DIGIT if ctx.state == SessionState::CountySelection => {
            let bounds = Pagination::new(ctx.county_page, COUNTIES_PER_PAGE, County::ALL.len());
            let page = if bounds.has_next() {
                ctx.county_page + 1
            } else {
                // Already on the last page: re-render it.
                ctx.county_page
            };
            Some(Decision::act(Action::CountyMenu { page }))
        }
        BACK_DIGIT => Some(match ctx.state {
            SessionState::CountySelection if ctx.county_page > 1 => {
                Decision::act(Action::CountyMenu {
                    page: ctx.county_page - 1,
                })
            }
            SessionState::CountySelection | SessionState::RiskStatus => {
                Decision::act(Action::MainMenu)
            }
            _ => Decision::act(Action::LanguageMenu {
                clear_choice: false,
            }),
        }),
        _ => None,
    }
}

/// Rule 6: replay a fully concatenated path from a client that never
/// relies on server-side state.
///
/// Only fires while the session sits at the language-selection default —
/// any session that progressed past that screen is state-tracked and its
/// accumulated path must not be re-read as a transcript. A pristine
/// session replays a language-prefixed path; a session whose language is
/// already resolved (registration shortcut) replays the two-step forms
/// starting at the main menu. An explicitly cleared language replays
/// nothing.
fn replay_full_path(ctx: &RouteContext, path: &NavigationPath) -> Option<Decision> {
    if ctx.state != SessionState::LanguageSelection {
        return None;
    }
    let steps = path.steps();
    if steps.len() < 2 {
        return None;
    }

    if ctx.pristine() {
        // Path starts with the language choice: lang * menu-choice [* county].
        let language = Language::from_menu_digit(&steps[0])?;
        return match (steps.len(), steps[1].as_str()) {
            (2, MENU_REGISTER) => Some(Decision::adopt(language, Action::CountyMenu { page: 1 })),
            (2, MENU_RISK_STATUS) => Some(Decision::adopt(language, Action::RiskQuery)),
            (2, MENU_UNSUBSCRIBE) => Some(Decision::adopt(language, Action::Unsubscribe)),
            (_, MENU_REGISTER) => Some(match County::from_code(&steps[2]) {
                Some(county) => Decision::adopt(language, Action::Register(county)),
                None => Decision::adopt(language, Action::RejectCounty),
            }),
            (_, MENU_RISK_STATUS) if steps[2] == RISK_BACK_DIGIT => {
                Some(Decision::adopt(language, Action::MainMenu))
            }
            _ => None,
        };
    }

    if !ctx.language_chosen {
        // Cleared: the subscriber is mid-reset, nothing to replay.
        return None;
    }

    // Language resolved by registration: register * county, or
    // risk-status * back. Exactly two steps.
    if steps.len() != 2 {
        return None;
    }
    match (steps[0].as_str(), steps[1].as_str()) {
        (MENU_REGISTER, code) => Some(match County::from_code(code) {
            Some(county) => Decision::act(Action::Register(county)),
            None => Decision::act(Action::RejectCounty),
        }),
        (MENU_RISK_STATUS, RISK_BACK_DIGIT) => Some(Decision::act(Action::MainMenu)),
        _ => None,
    }
}
