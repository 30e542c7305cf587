//! Stripe webhook handler.
//!
//! This endpoint is unauthenticated by design: Stripe calls it directly, and
//! trust comes entirely from the signature header. Every response is a bare
//! status code so Stripe's retry logic behaves sensibly: 2xx acknowledges the
//! event, 4xx rejects it permanently, 5xx asks for a redelivery.

use axum::{body::Bytes, extract::State, http::HeaderMap, http::StatusCode};
use secrecy::ExposeSecret;

use petfolio_core::Email;

use crate::db::UserRepository;
use crate::db::RepositoryError;
use crate::state::AppState;
use crate::stripe::types::{CHECKOUT_SESSION_COMPLETED, Event};
use crate::stripe::webhook::{SIGNATURE_HEADER, verify_signature};

/// Handle an incoming Stripe event.
///
/// Takes the raw body (not a `Json` extractor) because the signature is
/// computed over the exact bytes Stripe sent.
pub async fn stripe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        tracing::warn!("Webhook request missing signature header");
        return StatusCode::BAD_REQUEST;
    };

    let secret = state.config().stripe.webhook_secret.expose_secret();
    match verify_signature(&body, signature, secret) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!("Webhook signature verification failed");
            return StatusCode::BAD_REQUEST;
        }
        Err(e) => {
            tracing::warn!("Malformed webhook signature header: {e}");
            return StatusCode::BAD_REQUEST;
        }
    }

    let event: Event = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse webhook payload: {e}");
            return StatusCode::BAD_REQUEST;
        }
    };

    if event.event_type == CHECKOUT_SESSION_COMPLETED {
        handle_checkout_completed(&state, &event).await
    } else {
        tracing::info!(event_id = %event.id, event_type = %event.event_type, "Unhandled event type");
        StatusCode::OK
    }
}

/// Grant lifetime access to the account matching the checkout's customer
/// email.
///
/// Unknown emails are acknowledged rather than retried: the customer may have
/// paid with an address they never signed up with, and redelivering the event
/// will not fix that.
async fn handle_checkout_completed(state: &AppState, event: &Event) -> StatusCode {
    let Some(raw_email) = event.data.object.customer_email.as_deref() else {
        tracing::warn!(event_id = %event.id, "Checkout completed without a customer email");
        return StatusCode::OK;
    };

    let email = match Email::parse(raw_email) {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!(event_id = %event.id, "Unusable customer email on checkout: {e}");
            return StatusCode::OK;
        }
    };

    match UserRepository::new(state.pool()).grant_access(&email).await {
        Ok(()) => {
            tracing::info!(event_id = %event.id, "Access granted after checkout");
            StatusCode::OK
        }
        Err(RepositoryError::NotFound) => {
            tracing::warn!(event_id = %event.id, "Checkout completed for an unknown email");
            StatusCode::OK
        }
        Err(e) => {
            tracing::error!(event_id = %event.id, "Failed to grant access: {e}");
            sentry::capture_error(&e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
