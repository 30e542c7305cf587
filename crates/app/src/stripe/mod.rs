//! Stripe API client and webhook verification.
//!
//! Calls the Stripe REST API directly with `reqwest` (form-encoded, like the
//! official SDKs do under the hood) rather than pulling in a full SDK; the
//! only operations this service needs are creating a Checkout Session and
//! verifying inbound webhook signatures.

pub mod types;
pub mod webhook;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use petfolio_core::Email;

use crate::config::StripeConfig;
use types::CheckoutSession;

/// Stripe REST API base URL.
const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Errors that can occur when talking to the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe returned an error response.
    #[error("Stripe API error ({status}): {message}")]
    Api {
        /// HTTP status returned by Stripe.
        status: u16,
        /// Stripe's error message.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The created session is missing its hosted URL.
    #[error("checkout session has no redirect URL")]
    MissingRedirectUrl,
}

/// Client for the Stripe API.
#[derive(Clone)]
pub struct StripeClient {
    inner: Arc<StripeClientInner>,
}

struct StripeClientInner {
    client: reqwest::Client,
    secret_key: SecretString,
    price_id: String,
}

impl StripeClient {
    /// Create a new Stripe API client.
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            inner: Arc::new(StripeClientInner {
                client: reqwest::Client::new(),
                secret_key: config.secret_key.clone(),
                price_id: config.price_id.clone(),
            }),
        }
    }

    /// Create a Checkout Session for the one-time lifetime-access purchase.
    ///
    /// The session is bound to the buyer's email so the webhook can later
    /// match the completed payment back to the account.
    ///
    /// # Errors
    ///
    /// Returns `StripeError::Api` if Stripe rejects the request, or
    /// `StripeError::MissingRedirectUrl` if no hosted URL comes back.
    pub async fn create_checkout_session(
        &self,
        customer_email: &Email,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let params = [
            ("mode", "payment"),
            ("customer_email", customer_email.as_str()),
            ("line_items[0][price]", &self.inner.price_id),
            ("line_items[0][quantity]", "1"),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
        ];

        let response = self
            .inner
            .client
            .post(format!("{STRIPE_API_BASE}/v1/checkout/sessions"))
            .bearer_auth(self.inner.secret_key.expose_secret())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<types::ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "unknown error".to_owned());
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = serde_json::from_str(&body)?;
        Ok(session)
    }
}
