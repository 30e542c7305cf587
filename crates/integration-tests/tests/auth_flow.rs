//! Integration tests for signup, login, and logout.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The app server running (cargo run -p petfolio-app)
//!
//! Run with: cargo test -p petfolio-integration-tests -- --ignored

use reqwest::StatusCode;

use petfolio_integration_tests::{base_url, client, random_email, signup};

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_signup_starts_session() {
    let client = client();
    signup(&client, "correct horse battery").await;

    // The session cookie from signup should grant access to the account page
    let resp = client
        .get(format!("{}/account", base_url()))
        .send()
        .await
        .expect("Failed to fetch account");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse account body");
    assert_eq!(body["has_access"], false);
}

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_duplicate_signup_conflicts() {
    let client = client();
    let email = signup(&client, "correct horse battery").await;

    let resp = client
        .post(format!("{}/auth/signup", base_url()))
        .form(&[("email", email.as_str()), ("password", "another password")])
        .send()
        .await
        .expect("Failed to send duplicate signup");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_short_password_rejected() {
    let client = client();
    let resp = client
        .post(format!("{}/auth/signup", base_url()))
        .form(&[("email", random_email().as_str()), ("password", "short")])
        .send()
        .await
        .expect("Failed to send signup");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_login_with_wrong_password_fails() {
    let client = client();
    let email = signup(&client, "correct horse battery").await;

    // Fresh client so the signup session doesn't mask the failure
    let other = petfolio_integration_tests::client();
    let resp = other
        .post(format!("{}/auth/login", base_url()))
        .form(&[("email", email.as_str()), ("password", "wrong password")])
        .send()
        .await
        .expect("Failed to send login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_logout_ends_session() {
    let client = client();
    signup(&client, "correct horse battery").await;

    let resp = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert!(resp.status().is_redirection());

    // The old cookie must no longer authenticate
    let resp = client
        .get(format!("{}/app/pets", base_url()))
        .send()
        .await
        .expect("Failed to fetch pets");
    assert!(
        resp.status() == StatusCode::UNAUTHORIZED || resp.status().is_redirection(),
        "expected 401 or redirect after logout, got {}",
        resp.status()
    );
}

#[tokio::test]
#[ignore = "Requires running app server"]
async fn test_unauthenticated_api_request_gets_401() {
    // No cookies at all
    let client = client();
    let resp = client
        .post(format!("{}/app/pets", base_url()))
        .form(&[("name", "Benjamin")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
