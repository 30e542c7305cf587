//! Wire types for the subset of the Stripe API this service uses.

use serde::Deserialize;

/// Event type string Stripe sends when a Checkout Session finishes.
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// A created Checkout Session (response of `POST /v1/checkout/sessions`).
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID (`cs_...`).
    pub id: String,
    /// Hosted payment page URL the buyer is redirected to.
    pub url: Option<String>,
}

/// An inbound webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event ID (`evt_...`).
    pub id: String,
    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload.
    pub data: EventData,
}

/// The `data` field of a webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    /// The API object the event describes.
    pub object: EventObject,
}

/// The fields of the event object this service cares about.
///
/// For `checkout.session.completed` the object is a Checkout Session and
/// `customer_email` carries the email the session was created with.
#[derive(Debug, Clone, Deserialize)]
pub struct EventObject {
    /// Buyer email the Checkout Session was bound to.
    pub customer_email: Option<String>,
}

/// Stripe error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// The error details.
    pub error: ApiError,
}

/// Stripe error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checkout_completed_event() {
        let body = r#"{
            "id": "evt_1PFoo",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_123",
                    "customer_email": "buyer@example.com"
                }
            }
        }"#;

        let event: Event = serde_json::from_str(body).unwrap();
        assert_eq!(event.event_type, CHECKOUT_SESSION_COMPLETED);
        assert_eq!(
            event.data.object.customer_email.as_deref(),
            Some("buyer@example.com")
        );
    }

    #[test]
    fn test_parse_event_without_email() {
        let body = r#"{
            "id": "evt_2",
            "type": "payment_intent.succeeded",
            "data": { "object": { "amount": 1000 } }
        }"#;

        let event: Event = serde_json::from_str(body).unwrap();
        assert_eq!(event.event_type, "payment_intent.succeeded");
        assert!(event.data.object.customer_email.is_none());
    }

    #[test]
    fn test_parse_checkout_session() {
        let body = r#"{"id":"cs_test_456","url":"https://checkout.stripe.com/c/pay/cs_test_456"}"#;
        let session: CheckoutSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.id, "cs_test_456");
        assert!(session.url.as_deref().unwrap().starts_with("https://"));
    }
}
