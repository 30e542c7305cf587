//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Auth
//! POST /auth/signup            - Create account, start session
//! POST /auth/login             - Verify credentials, start session
//! POST /auth/logout            - End session
//!
//! # Pets (require auth)
//! GET    /app/pets             - List the session user's pets
//! POST   /app/pets             - Add a pet
//! POST   /app/pets/{id}        - Edit a pet (owner only)
//! DELETE /app/pets/{id}        - Delete a pet (owner only)
//! GET    /app/dashboard        - Account summary
//!
//! # Billing (require auth)
//! GET  /account                - Email + access flag
//! POST /billing/checkout       - Create Checkout Session, redirect to Stripe
//!
//! # Webhooks
//! POST /api/stripe/webhook     - Signature-verified Stripe events
//! ```

pub mod auth;
pub mod billing;
pub mod pets;
pub mod webhooks;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the pet routes router (all require auth).
pub fn pet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pets::list).post(pets::create))
        .route("/{id}", post(pets::update).delete(pets::delete))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth routes
        .nest("/auth", auth_routes())
        // Pet routes
        .nest("/app/pets", pet_routes())
        .route("/app/dashboard", get(billing::account))
        // Billing
        .route("/account", get(billing::account))
        .route("/billing/checkout", post(billing::checkout))
        // Stripe webhook
        .route("/api/stripe/webhook", post(webhooks::stripe))
}
