//! Integration tests for the Stripe webhook endpoint.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The app server running (cargo run -p petfolio-app)
//! - `STRIPE_WEBHOOK_SECRET` set to the same value the server uses
//!
//! Run with: cargo test -p petfolio-integration-tests -- --ignored

use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use serde_json::json;
use sha2::Sha256;

use petfolio_integration_tests::{base_url, client, signup};

fn webhook_secret() -> String {
    std::env::var("STRIPE_WEBHOOK_SECRET").expect("STRIPE_WEBHOOK_SECRET must be set")
}

/// Build a `stripe-signature` header for `payload`, the way Stripe would.
fn sign(payload: &str, secret: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp},v1={signature}")
}

fn checkout_completed_payload(email: &str) -> String {
    json!({
        "id": "evt_test_1",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": "cs_test_1",
                "customer_email": email
            }
        }
    })
    .to_string()
}

async fn post_webhook(payload: &str, signature: Option<&str>) -> StatusCode {
    let client = client();
    let mut req = client
        .post(format!("{}/api/stripe/webhook", base_url()))
        .header("content-type", "application/json")
        .body(payload.to_string());
    if let Some(sig) = signature {
        req = req.header("stripe-signature", sig);
    }
    req.send().await.expect("Failed to post webhook").status()
}

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_missing_signature_rejected() {
    let payload = checkout_completed_payload("nobody@example.com");
    assert_eq!(post_webhook(&payload, None).await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_invalid_signature_rejected() {
    let payload = checkout_completed_payload("nobody@example.com");
    let forged = sign(&payload, "whsec_not_the_real_secret");
    assert_eq!(
        post_webhook(&payload, Some(&forged)).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
#[ignore = "Requires running app server and STRIPE_WEBHOOK_SECRET"]
async fn test_checkout_completed_grants_access() {
    let client = client();
    let email = signup(&client, "correct horse battery").await;

    // A fresh account starts without access
    let resp = client
        .get(format!("{}/account", base_url()))
        .send()
        .await
        .expect("Failed to fetch account");
    let body: serde_json::Value = resp.json().await.expect("Failed to parse account");
    assert_eq!(body["has_access"], false);

    let payload = checkout_completed_payload(&email);
    let signature = sign(&payload, &webhook_secret());
    assert_eq!(post_webhook(&payload, Some(&signature)).await, StatusCode::OK);

    // The flag flips on the next read
    let resp = client
        .get(format!("{}/account", base_url()))
        .send()
        .await
        .expect("Failed to fetch account");
    let body: serde_json::Value = resp.json().await.expect("Failed to parse account");
    assert_eq!(body["has_access"], true);
}

#[tokio::test]
#[ignore = "Requires running app server and STRIPE_WEBHOOK_SECRET"]
async fn test_unknown_event_type_acknowledged() {
    let payload = json!({
        "id": "evt_test_2",
        "type": "invoice.paid",
        "data": { "object": {} }
    })
    .to_string();
    let signature = sign(&payload, &webhook_secret());
    assert_eq!(post_webhook(&payload, Some(&signature)).await, StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running app server and STRIPE_WEBHOOK_SECRET"]
async fn test_checkout_for_unknown_email_acknowledged() {
    let payload = checkout_completed_payload("never-signed-up@example.com");
    let signature = sign(&payload, &webhook_secret());
    assert_eq!(post_webhook(&payload, Some(&signature)).await, StatusCode::OK);
}
