//! # USSD Gateway Callback
//!
//! POST /ussd — the Africa's Talking callback. Form-encoded request with
//! `sessionId`, `phoneNumber`, and the accumulated `text`; plain-text
//! response whose body starts with `CON ` (keep the session open) or
//! `END ` (terminate with a final message).
//!
//! Always answers 200. The gateway treats any other status as a network
//! failure and shows subscribers a generic error, so even an unusable
//! phone number gets a rendered `END` screen instead of an HTTP error.

use axum::extract::State;
use axum::Form;
use cas_core::{Language, PhoneNumber};
use cas_menu::{text, ScreenKey};
use cas_router::UssdResponse;
use serde::Deserialize;

use crate::state::AppState;

/// The gateway's callback form. Every field is defaulted so a partial
/// request still deserializes and gets a protocol-level answer.
#[derive(Debug, Deserialize)]
pub struct UssdCallback {
    #[serde(rename = "sessionId", default)]
    pub session_id: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: String,
    /// The full accumulated navigation path, `*`-joined.
    #[serde(default)]
    pub text: String,
}

/// POST /ussd
pub async fn callback(State(state): State<AppState>, Form(form): Form<UssdCallback>) -> String {
    let phone = match PhoneNumber::new(form.phone_number.as_str()) {
        Ok(phone) => phone,
        Err(error) => {
            tracing::warn!(
                session_id = %form.session_id,
                %error,
                "callback with unusable phone number"
            );
            return UssdResponse::End(text(Language::En, ScreenKey::InvalidOption, &[])).render();
        }
    };

    tracing::info!(
        session_id = %form.session_id,
        phone = %phone,
        text = %form.text,
        "ussd callback"
    );

    state.router.handle(&phone, &form.text).await.render()
}
