//! # Gateway Protocol Contract
//!
//! The invariants the USSD gateway relies on, checked over the real HTTP
//! stack: every callback answers 200 with a `CON `/`END ` body no matter
//! the input, stateless clients replaying their full accumulated path
//! reach the same outcomes as step-tracked ones, and the navigation
//! controls behave the same from every screen.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use cas_api::state::AppState;
use cas_core::County;
use cas_sms::MemoryNotifier;
use cas_store::{InMemoryAlertStore, InMemoryRegistry, RegistrationGateway};
use http_body_util::BodyExt;
use proptest::prelude::*;
use tower::ServiceExt;

fn test_state(debug_secret: Option<&str>) -> (AppState, InMemoryRegistry) {
    let registry = InMemoryRegistry::new();
    let state = AppState::with_gateways(
        Arc::new(registry.clone()),
        InMemoryAlertStore::new(),
        Arc::new(MemoryNotifier::new()),
        debug_secret.map(str::to_string),
    );
    (state, registry)
}

async fn dial_raw(app: &axum::Router, phone: &str, text: &str) -> axum::response::Response {
    let encoded: String = text
        .bytes()
        .map(|b| format!("%{b:02X}"))
        .collect();
    let body = format!("sessionId=ATUid_contract&phoneNumber={phone}&text={encoded}");
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ussd")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn dial(app: &axum::Router, phone: &str, text: &str) -> String {
    let response = dial_raw(app, phone, text).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Always a valid protocol reply
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No input, however mangled, produces anything but a 200 with a
    /// protocol-prefixed body.
    #[test]
    fn every_input_gets_a_protocol_reply(text in "[0-9*#a-z ]{0,40}") {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let (state, _) = test_state(None);
            let app = cas_api::app(state);
            let reply = dial(&app, "0799999999", &text).await;
            prop_assert!(
                reply.starts_with("CON ") || reply.starts_with("END "),
                "malformed reply for {text:?}: {reply}"
            );
            Ok(())
        })?;
    }
}

#[tokio::test]
async fn callback_replies_are_plain_text() {
    let (state, _) = test_state(None);
    let app = cas_api::app(state);
    let response = dial_raw(&app, "0700000000", "").await;
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "got: {content_type}");
}

// ---------------------------------------------------------------------------
// Stateless replay equivalence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn one_shot_path_matches_step_tracked_outcome() {
    // Step-tracked subscriber.
    let (state, tracked_registry) = test_state(None);
    let tracked = cas_api::app(state);
    let p = "0700000001";
    dial(&tracked, p, "").await;
    dial(&tracked, p, "1").await;
    dial(&tracked, p, "1*1").await;
    let tracked_reply = dial(&tracked, p, "1*1*5").await;

    // Stateless client sends the whole path in one callback.
    let (state, oneshot_registry) = test_state(None);
    let stateless = cas_api::app(state);
    let oneshot_reply = dial(&stateless, p, "1*1*5").await;

    assert_eq!(tracked_reply, oneshot_reply);
    let a = tracked_registry
        .find_by_phone(&cas_core::PhoneNumber::new(p).unwrap())
        .await
        .unwrap()
        .unwrap();
    let b = oneshot_registry
        .find_by_phone(&cas_core::PhoneNumber::new(p).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a.county, County::Marsabit);
    assert_eq!(a.county, b.county);
    assert_eq!(a.language, b.language);
}

#[tokio::test]
async fn one_shot_invalid_county_terminates_with_invalid_county() {
    let (state, registry) = test_state(None);
    let app = cas_api::app(state);
    let reply = dial(&app, "0700000002", "1*1*42").await;
    assert_eq!(reply, "END Invalid county selection. Please try again.");
    assert!(registry.is_empty());
}

// ---------------------------------------------------------------------------
// Navigation controls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn main_menu_jump_works_from_deep_navigation() {
    let (state, _) = test_state(None);
    let app = cas_api::app(state);
    let p = "0700000003";
    dial(&app, p, "").await;
    dial(&app, p, "1").await;
    dial(&app, p, "1*1").await;
    dial(&app, p, "1*1*98").await;

    let reply = dial(&app, p, "1*1*98*00").await;
    assert!(reply.contains("Climate Alert System"));
}

#[tokio::test]
async fn back_from_first_county_page_returns_to_main_menu() {
    let (state, _) = test_state(None);
    let app = cas_api::app(state);
    let p = "0700000004";
    dial(&app, p, "").await;
    dial(&app, p, "1").await;
    dial(&app, p, "1*1").await;

    let reply = dial(&app, p, "1*1*0").await;
    assert!(reply.contains("Climate Alert System"));
}

#[tokio::test]
async fn next_page_on_the_last_page_re_renders_it() {
    let (state, _) = test_state(None);
    let app = cas_api::app(state);
    let p = "0700000005";
    dial(&app, p, "").await;
    dial(&app, p, "1").await;
    dial(&app, p, "1*1").await;
    dial(&app, p, "1*1*98").await;

    let reply = dial(&app, p, "1*1*98*98").await;
    assert!(reply.contains("6. Makueni"), "stays on the last page");
    assert!(reply.starts_with("CON "));
}

#[tokio::test]
async fn unrecognized_input_re_prompts_the_same_screen() {
    let (state, _) = test_state(None);
    let app = cas_api::app(state);
    let p = "0700000006";
    dial(&app, p, "").await;
    dial(&app, p, "1").await;

    let reply = dial(&app, p, "1*77").await;
    assert!(reply.starts_with("CON Invalid option."));
    assert!(reply.contains("Climate Alert System"));
}

// ---------------------------------------------------------------------------
// Maintenance endpoint over the full stack
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clearing_sessions_resets_navigation_but_not_registrations() {
    let (state, registry) = test_state(Some("hunter2"));
    let app = cas_api::app(state);

    // One subscriber mid-navigation, one registered.
    let roaming = "0700000007";
    dial(&app, roaming, "").await;
    dial(&app, roaming, "1").await;
    let registered = "0700000008";
    dial(&app, registered, "1*1*6").await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/debug/clear_sessions")
                .header("X-USSD-SECRET", "hunter2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "cleared");
    assert_eq!(body["sessions_cleared"], 2);

    // The roaming subscriber is back at the language prompt.
    let reply = dial(&app, roaming, "").await;
    assert!(reply.starts_with("CON Select Language"));

    // The registered subscriber's durable record survived and still
    // short-circuits the language prompt.
    assert_eq!(registry.len(), 1);
    let reply = dial(&app, registered, "").await;
    assert!(reply.contains("Climate Alert System"));
}
