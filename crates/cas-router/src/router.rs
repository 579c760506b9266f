//! # Effect Executor
//!
//! [`UssdRouter`] turns a callback into a reply: it resolves the routing
//! context from the session store and the registration gateway, runs the
//! pure decision table, then executes the chosen action against the
//! collaborators (session store, registrations, alerts, SMS).
//!
//! ## Error boundary
//!
//! [`UssdRouter::handle`] never returns an error. Registration and
//! unsubscribe storage faults degrade to their own terminal screens; any
//! other fault is logged and mapped to the main-menu fallback in the
//! session's language. A notification failure after a successful
//! registration is logged and discarded, never shown to the subscriber.

use std::sync::Arc;

use cas_core::{County, Language, PhoneNumber};
use cas_menu::{county_menu, text, ScreenKey, COUNTIES_PER_PAGE};
use cas_session::{LanguageChosen, SessionState, SessionStore, SessionUpdate};
use cas_sms::NotificationGateway;
use cas_store::{AlertQueryGateway, RegistrationGateway};

use crate::decision::{decide, Action, RouteContext};
use crate::error::RouteError;
use crate::path::NavigationPath;
use crate::response::UssdResponse;

/// The USSD request handler: session resolution, routing, effects.
#[derive(Clone)]
pub struct UssdRouter {
    sessions: SessionStore,
    registrations: Arc<dyn RegistrationGateway>,
    alerts: Arc<dyn AlertQueryGateway>,
    notifier: Arc<dyn NotificationGateway>,
}

impl UssdRouter {
    pub fn new(
        sessions: SessionStore,
        registrations: Arc<dyn RegistrationGateway>,
        alerts: Arc<dyn AlertQueryGateway>,
        notifier: Arc<dyn NotificationGateway>,
    ) -> Self {
        Self {
            sessions,
            registrations,
            alerts,
            notifier,
        }
    }

    /// Shared session store, exposed for the maintenance endpoint.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one gateway callback. Infallible by contract: every fault
    /// below this point is logged and mapped to a valid reply.
    pub async fn handle(&self, phone: &PhoneNumber, input: &str) -> UssdResponse {
        let path = NavigationPath::parse(input);
        match self.route(phone, &path).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::error!(
                    phone = %phone,
                    %error,
                    "routing fault, falling back to main menu"
                );
                let language = self.sessions.get(phone.as_str()).language;
                UssdResponse::Con(text(language, ScreenKey::MainMenu, &[]))
            }
        }
    }

    async fn route(
        &self,
        phone: &PhoneNumber,
        path: &NavigationPath,
    ) -> Result<UssdResponse, RouteError> {
        let session = self.sessions.get(phone.as_str());

        // Fold the tri-state session flag together with the durable
        // registration: Cleared blocks the registration shortcut so an
        // explicit language reset actually re-asks the question.
        let (language, language_chosen) = match session.language_chosen {
            LanguageChosen::Chosen => (session.language, true),
            LanguageChosen::Cleared => (session.language, false),
            LanguageChosen::Unset => match self.registrations.find_by_phone(phone).await? {
                Some(reg) if reg.active => (reg.language, true),
                _ => (session.language, false),
            },
        };

        let ctx = RouteContext {
            language,
            language_chosen,
            language_cleared: session.language_chosen == LanguageChosen::Cleared,
            state: session.state,
            county_page: session.county_page,
        };
        let decision = decide(&ctx, path);

        tracing::debug!(
            phone = %phone,
            state = session.state.as_str(),
            step = path.last().unwrap_or(""),
            action = ?decision.action,
            "routed callback"
        );

        // Language adoption persists before the action runs so the screen
        // it produces already renders in the adopted language.
        let language = match decision.adopt_language {
            Some(adopted) => {
                self.sessions.set(
                    phone.as_str(),
                    SessionUpdate::new()
                        .language(adopted)
                        .language_chosen(LanguageChosen::Chosen)
                        .county_page(1),
                );
                adopted
            }
            None => language,
        };

        let reply = match decision.action {
            Action::LanguageMenu { clear_choice } => {
                let mut update = SessionUpdate::new()
                    .state(SessionState::LanguageSelection)
                    .county_page(1);
                if clear_choice {
                    update = update.language_chosen(LanguageChosen::Cleared);
                }
                self.sessions.set(phone.as_str(), update);
                UssdResponse::Con(text(language, ScreenKey::LanguageSelection, &[]))
            }
            Action::MainMenu => {
                self.sessions.set(
                    phone.as_str(),
                    SessionUpdate::new()
                        .state(SessionState::MainMenu)
                        .county_page(1),
                );
                UssdResponse::Con(text(language, ScreenKey::MainMenu, &[]))
            }
            Action::CountyMenu { page } => {
                self.sessions.set(
                    phone.as_str(),
                    SessionUpdate::new()
                        .state(SessionState::CountySelection)
                        .county_page(page),
                );
                UssdResponse::Con(county_menu(language, page, COUNTIES_PER_PAGE))
            }
            Action::Register(county) => self.register(phone, county, language).await,
            Action::RejectCounty => {
                self.reset_after_terminal(phone);
                UssdResponse::End(text(language, ScreenKey::InvalidCounty, &[]))
            }
            Action::RiskQuery => self.risk_query(phone, language).await?,
            Action::Unsubscribe => self.unsubscribe(phone, language).await,
            Action::Redisplay => {
                UssdResponse::Con(self.redisplay(phone, &ctx, language).await?)
            }
        };
        Ok(reply)
    }

    /// Register (or re-register) the subscriber, send the confirmation SMS,
    /// and terminate. Storage failure degrades to its own terminal screen;
    /// notification failure is logged and discarded.
    async fn register(
        &self,
        phone: &PhoneNumber,
        county: County,
        language: Language,
    ) -> UssdResponse {
        match self.registrations.upsert(phone, county, language).await {
            Ok(registration) => {
                let county_name = registration.county.display_name(language);
                let confirmation = text(
                    language,
                    ScreenKey::RegistrationConfirmation,
                    &[("county", county_name)],
                );
                if let Err(error) = self.notifier.send(phone, &confirmation).await {
                    tracing::warn!(
                        phone = %phone,
                        %error,
                        "confirmation sms failed, registration stands"
                    );
                }
                tracing::info!(
                    phone = %phone,
                    county = registration.county.key(),
                    language = language.as_str(),
                    "subscriber registered"
                );
                self.reset_after_terminal(phone);
                UssdResponse::End(text(
                    language,
                    ScreenKey::RegistrationSuccess,
                    &[("county", county_name)],
                ))
            }
            Err(error) => {
                tracing::error!(phone = %phone, %error, "registration storage failed");
                UssdResponse::End(text(language, ScreenKey::RegistrationError, &[]))
            }
        }
    }

    /// Look up the latest approved alert for the subscriber's registered
    /// county. Unregistered (or unsubscribed) callers are told to register
    /// first; a county without alerts gets a terminal all-clear.
    async fn risk_query(
        &self,
        phone: &PhoneNumber,
        language: Language,
    ) -> Result<UssdResponse, RouteError> {
        let registration = match self.registrations.find_by_phone(phone).await? {
            Some(reg) if reg.active => reg,
            _ => {
                self.reset_after_terminal(phone);
                return Ok(UssdResponse::End(text(
                    language,
                    ScreenKey::RegisterFirst,
                    &[],
                )));
            }
        };

        let county_name = registration.county.display_name(language);
        match self.alerts.latest_approved(registration.county).await? {
            Some(alert) => {
                self.sessions.set(
                    phone.as_str(),
                    SessionUpdate::new().state(SessionState::RiskStatus),
                );
                let mut screen = text(
                    language,
                    ScreenKey::RiskStatusTitle,
                    &[("county", county_name)],
                );
                screen.push_str(&alert.message);
                screen.push_str(&text(language, ScreenKey::BackToMenu, &[]));
                Ok(UssdResponse::Con(screen))
            }
            None => {
                self.reset_after_terminal(phone);
                Ok(UssdResponse::End(text(
                    language,
                    ScreenKey::NoAlerts,
                    &[("county", county_name)],
                )))
            }
        }
    }

    /// Deactivate the registration and terminate. Idempotent for callers
    /// who were never registered.
    async fn unsubscribe(&self, phone: &PhoneNumber, language: Language) -> UssdResponse {
        match self.registrations.deactivate(phone).await {
            Ok(()) => {
                tracing::info!(phone = %phone, "subscriber unsubscribed");
                self.reset_after_terminal(phone);
                UssdResponse::End(text(language, ScreenKey::Unsubscribed, &[]))
            }
            Err(error) => {
                tracing::error!(phone = %phone, %error, "unsubscribe storage failed");
                UssdResponse::End(text(language, ScreenKey::UnsubscribeError, &[]))
            }
        }
    }

    /// Re-render the current screen behind an invalid-input notice.
    async fn redisplay(
        &self,
        phone: &PhoneNumber,
        ctx: &RouteContext,
        language: Language,
    ) -> Result<String, RouteError> {
        let screen = match ctx.state {
            SessionState::LanguageSelection => text(language, ScreenKey::LanguageSelection, &[]),
            SessionState::MainMenu => text(language, ScreenKey::MainMenu, &[]),
            SessionState::CountySelection => {
                county_menu(language, ctx.county_page, COUNTIES_PER_PAGE)
            }
            SessionState::RiskStatus => {
                // Rebuild the alert screen if one still exists; otherwise
                // fall back to the main menu rather than a blank prompt.
                match self.risk_query(phone, language).await? {
                    UssdResponse::Con(screen) => screen,
                    UssdResponse::End(_) => {
                        self.sessions.set(
                            phone.as_str(),
                            SessionUpdate::new()
                                .state(SessionState::MainMenu)
                                .county_page(1),
                        );
                        text(language, ScreenKey::MainMenu, &[])
                    }
                }
            }
        };
        Ok(format!(
            "{}\n{}",
            text(language, ScreenKey::InvalidOption, &[]),
            screen
        ))
    }

    /// A terminal reply closes the gateway session; the next dial-in starts
    /// a fresh conversation at the main menu (the language choice survives).
    fn reset_after_terminal(&self, phone: &PhoneNumber) {
        self.sessions.set(
            phone.as_str(),
            SessionUpdate::new()
                .state(SessionState::MainMenu)
                .county_page(1),
        );
    }
}
