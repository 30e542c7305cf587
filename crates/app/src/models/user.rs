//! User domain types.

use chrono::{DateTime, Utc};

use petfolio_core::{Email, UserId};

/// An account holder (domain type).
///
/// The password hash is intentionally not carried here; it is only surfaced
/// by the repository call that verifies credentials.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Whether the user has paid for lifetime access.
    pub has_access: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
