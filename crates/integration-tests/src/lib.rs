//! Integration tests for PetFolio.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and the app server first:
//! cargo run -p petfolio-cli -- migrate
//! cargo run -p petfolio-app
//!
//! # Then run the live-server tests:
//! cargo test -p petfolio-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP; its base URL is taken from
//! `PETFOLIO_BASE_URL` (default `http://localhost:3000`). Each test signs up
//! a fresh account with a random email, so runs do not interfere with each
//! other or with existing data.

use reqwest::Client;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("PETFOLIO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build an HTTP client that keeps session cookies and does not follow
/// redirects, so handlers' redirect responses can be asserted directly.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique throwaway email address.
#[must_use]
pub fn random_email() -> String {
    format!("it-{}@example.com", uuid::Uuid::new_v4().simple())
}

/// Sign up a fresh account and return its email. The client's cookie store
/// ends up holding the session.
///
/// # Panics
///
/// Panics if the signup request fails or is rejected.
pub async fn signup(client: &Client, password: &str) -> String {
    let email = random_email();
    let resp = client
        .post(format!("{}/auth/signup", base_url()))
        .form(&[("email", email.as_str()), ("password", password)])
        .send()
        .await
        .expect("Failed to sign up");

    assert!(
        resp.status().is_redirection(),
        "signup should redirect, got {}",
        resp.status()
    );
    email
}
