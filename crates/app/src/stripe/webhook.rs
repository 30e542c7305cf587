//! Stripe webhook signature verification.
//!
//! Stripe signs each webhook delivery with a `stripe-signature` header of the
//! form `t=<unix timestamp>,v1=<hex hmac>[,v1=...]`. The signed payload is
//! `"{timestamp}.{raw body}"`, keyed with the endpoint's webhook secret using
//! HMAC-SHA256. Deliveries older than the tolerance window are rejected to
//! prevent replay.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signature header Stripe sends.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum accepted age of a signed payload, in seconds (5 minutes).
const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Errors for signature headers that cannot be evaluated at all.
///
/// A header that parses but does not match yields `Ok(false)` from
/// [`verify_signature`], not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The header has no `t=` element.
    #[error("signature header is missing the timestamp")]
    MissingTimestamp,

    /// The header has no `v1=` element.
    #[error("signature header is missing a v1 signature")]
    MissingSignature,

    /// The timestamp is not a valid integer.
    #[error("signature header has a malformed timestamp")]
    MalformedTimestamp,
}

/// Verify a `stripe-signature` header against the raw request body.
///
/// Returns `Ok(true)` when some `v1` signature in the header matches the
/// expected HMAC and the timestamp is within tolerance; `Ok(false)` when the
/// header is well-formed but does not verify.
///
/// # Errors
///
/// Returns `SignatureError` when the header is structurally invalid
/// (missing or malformed `t=` / `v1=` elements).
pub fn verify_signature(
    payload: &[u8],
    signature_header: &str,
    secret: &str,
) -> Result<bool, SignatureError> {
    verify_signature_at(payload, signature_header, secret, chrono::Utc::now().timestamp())
}

/// [`verify_signature`] with an explicit "now", for testability.
fn verify_signature_at(
    payload: &[u8],
    signature_header: &str,
    secret: &str,
    now: i64,
) -> Result<bool, SignatureError> {
    let (timestamp, signatures) = parse_header(signature_header)?;

    // Reject stale deliveries (replay protection)
    if (now - timestamp).abs() > TIMESTAMP_TOLERANCE_SECS {
        return Ok(false);
    }

    let expected = compute_signature(payload, secret, timestamp);

    Ok(signatures.iter().any(|sig| constant_time_eq(sig, &expected)))
}

/// Parse the header into its timestamp and candidate `v1` signatures.
fn parse_header(header: &str) -> Result<(i64, Vec<String>), SignatureError> {
    let mut timestamp: Option<&str> = None;
    let mut signatures: Vec<String> = Vec::new();

    for element in header.split(',') {
        match element.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value.to_owned()),
            // Older scheme versions and unknown elements are ignored
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or(SignatureError::MissingTimestamp)?
        .parse::<i64>()
        .map_err(|_| SignatureError::MalformedTimestamp)?;

    if signatures.is_empty() {
        return Err(SignatureError::MissingSignature);
    }

    Ok((timestamp, signatures))
}

/// Compute the expected hex signature for a payload and timestamp.
fn compute_signature(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any size"));
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Compare two hex signatures without early exit on mismatch.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test123secret456";
    const PAYLOAD: &[u8] = b"{\"type\":\"checkout.session.completed\"}";

    fn signed_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
        format!("t={},v1={}", timestamp, compute_signature(payload, secret, timestamp))
    }

    #[test]
    fn test_valid_signature_accepted() {
        let now = chrono::Utc::now().timestamp();
        let header = signed_header(PAYLOAD, SECRET, now);

        let result = verify_signature_at(PAYLOAD, &header, SECRET, now).unwrap();
        assert!(result, "valid signature should be accepted");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = chrono::Utc::now().timestamp();
        let header = signed_header(PAYLOAD, "wrong_secret", now);

        let result = verify_signature_at(PAYLOAD, &header, SECRET, now).unwrap();
        assert!(!result, "signature from the wrong secret should be rejected");
    }

    #[test]
    fn test_modified_payload_rejected() {
        let now = chrono::Utc::now().timestamp();
        let header = signed_header(PAYLOAD, SECRET, now);
        let tampered = b"{\"type\":\"checkout.session.completed\",\"hacked\":true}";

        let result = verify_signature_at(tampered, &header, SECRET, now).unwrap();
        assert!(!result, "modified payload should be rejected");
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let now = chrono::Utc::now().timestamp();
        // Signed 10 minutes ago - beyond the 5-minute tolerance
        let old = now - 600;
        let header = signed_header(PAYLOAD, SECRET, old);

        let result = verify_signature_at(PAYLOAD, &header, SECRET, now).unwrap();
        assert!(!result, "stale timestamp should be rejected");
    }

    #[test]
    fn test_second_v1_signature_accepted() {
        // During secret rotation Stripe sends multiple v1 signatures
        let now = chrono::Utc::now().timestamp();
        let good = compute_signature(PAYLOAD, SECRET, now);
        let header = format!("t={now},v1=deadbeef,v1={good}");

        let result = verify_signature_at(PAYLOAD, &header, SECRET, now).unwrap();
        assert!(result);
    }

    #[test]
    fn test_missing_timestamp_errors() {
        let result = verify_signature(PAYLOAD, "v1=somesignature", SECRET);
        assert_eq!(result.unwrap_err(), SignatureError::MissingTimestamp);
    }

    #[test]
    fn test_missing_signature_errors() {
        let result = verify_signature(PAYLOAD, "t=1234567890", SECRET);
        assert_eq!(result.unwrap_err(), SignatureError::MissingSignature);
    }

    #[test]
    fn test_malformed_header_errors() {
        let result = verify_signature(PAYLOAD, "garbage", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_timestamp_errors() {
        let result = verify_signature(PAYLOAD, "t=not-a-number,v1=abc", SECRET);
        assert_eq!(result.unwrap_err(), SignatureError::MalformedTimestamp);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc123", "abc123"));
        assert!(!constant_time_eq("abc123", "abc124"));
        assert!(!constant_time_eq("abc123", "abc1234"));
    }
}
