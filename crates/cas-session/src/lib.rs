//! # cas-session — Per-Subscriber Session Store
//!
//! USSD transports no connection state: every callback arrives as an
//! independent HTTP request. This crate holds the ephemeral navigation
//! context that lets the router reconstruct a conversation from nothing
//! but the subscriber's phone number.
//!
//! ## Concurrency contract
//!
//! The store is shared mutable state keyed by phone number. All operations
//! take a single `parking_lot::RwLock` write or read guard and never hold
//! it across `.await` points (the store is fully synchronous). A
//! multi-field [`SessionUpdate`] merges under one write guard, so a
//! concurrent double-submit for the same subscriber observes one update or
//! the other — never a torn mix.
//!
//! ## Lifecycle
//!
//! Sessions are created on first read ([`SessionStore::get`] auto-vivifies
//! — several router call sites rely on this) and persist for the life of
//! the process. There is no expiry; [`SessionStore::clear`] exists for the
//! secret-guarded maintenance endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use cas_core::Language;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// ── Session state ───────────────────────────────────────────────────────────

/// The screen a subscriber is currently on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Choosing a language; the state of every fresh session.
    #[default]
    LanguageSelection,
    /// Top-level menu: register / risk status / unsubscribe.
    MainMenu,
    /// Paging through the county catalog.
    CountySelection,
    /// Viewing the latest alert, with a back control.
    RiskStatus,
}

impl SessionState {
    /// The string representation used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LanguageSelection => "language_selection",
            Self::MainMenu => "main_menu",
            Self::CountySelection => "county_selection",
            Self::RiskStatus => "risk_status",
        }
    }
}

/// Tri-state "has this subscriber chosen a language this session" flag.
///
/// Three values, not two: [`LanguageChosen::Unset`] means the question was
/// never asked (a durable registration may still answer it), while
/// [`LanguageChosen::Cleared`] means the subscriber explicitly asked to
/// re-select — a registration must NOT short-circuit the language menu in
/// that case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageChosen {
    /// Never asked this session.
    #[default]
    Unset,
    /// Explicitly chosen this session.
    Chosen,
    /// Explicitly reset to force re-selection.
    Cleared,
}

/// Ephemeral navigation state for one subscriber.
///
/// Never partially constructed: every field has a documented default
/// (English, unset choice, language-selection screen, page 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Selected language; the system default until explicitly chosen.
    pub language: Language,
    /// Whether the language was chosen (or reset) this session.
    pub language_chosen: LanguageChosen,
    /// Current screen.
    pub state: SessionState,
    /// Current county-list page, 1-indexed. Reset to 1 whenever a screen
    /// change invalidates prior pagination context.
    pub county_page: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            language: Language::default(),
            language_chosen: LanguageChosen::Unset,
            state: SessionState::LanguageSelection,
            county_page: 1,
        }
    }
}

// ── Merge updates ───────────────────────────────────────────────────────────

/// A partial session update: only the populated fields are written, the
/// rest keep their current values. Applied atomically under one write lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub language: Option<Language>,
    pub language_chosen: Option<LanguageChosen>,
    pub state: Option<SessionState>,
    pub county_page: Option<u32>,
}

impl SessionUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn language_chosen(mut self, chosen: LanguageChosen) -> Self {
        self.language_chosen = Some(chosen);
        self
    }

    pub fn state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn county_page(mut self, page: u32) -> Self {
        self.county_page = Some(page);
        self
    }

    fn apply(&self, session: &mut Session) {
        if let Some(language) = self.language {
            session.language = language;
        }
        if let Some(chosen) = self.language_chosen {
            session.language_chosen = chosen;
        }
        if let Some(state) = self.state {
            session.state = state;
        }
        if let Some(page) = self.county_page {
            session.county_page = page;
        }
    }
}

// ── Store ───────────────────────────────────────────────────────────────────

/// Thread-safe, cloneable per-subscriber session store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable — a panicking writer does not
/// permanently corrupt the store.
#[derive(Debug, Default)]
pub struct SessionStore {
    data: Arc<RwLock<HashMap<String, Session>>>,
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `phone`, creating a default one if absent.
    ///
    /// The auto-vivify-on-read semantic is deliberate: the router reads a
    /// session before it knows whether the subscriber has ever dialed in,
    /// and the default session IS the correct state for a first contact.
    pub fn get(&self, phone: &str) -> Session {
        self.data
            .write()
            .entry(phone.to_string())
            .or_default()
            .clone()
    }

    /// Merge `update` into the session for `phone` under one write lock,
    /// creating the session first if absent. Returns the merged session.
    pub fn set(&self, phone: &str, update: SessionUpdate) -> Session {
        let mut guard = self.data.write();
        let session = guard.entry(phone.to_string()).or_default();
        update.apply(session);
        session.clone()
    }

    /// Wipe all sessions, returning how many were cleared.
    ///
    /// Reached only through the secret-guarded maintenance endpoint.
    pub fn clear(&self) -> usize {
        let mut guard = self.data.write();
        let count = guard.len();
        guard.clear();
        count
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
