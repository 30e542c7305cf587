//! Validated pet field types.
//!
//! Each field of a pet record has its own parse-style newtype so that a
//! constructed value always satisfies the form constraints:
//!
//! - [`PetName`] / [`OwnerName`] - trimmed, 1-100 characters
//! - [`PetAge`] - integer between 1 and 100
//! - [`PetNotes`] - trimmed, at most 1000 characters, may be empty
//! - [`PetImageUrl`] - a valid absolute URL, or blank (replaced by the
//!   placeholder image)

use core::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder image used when a pet is created without an image URL.
pub const DEFAULT_PET_IMAGE_URL: &str = "https://images.petfolio.app/pet-placeholder.png";

/// Errors that can occur when parsing pet field values.
#[derive(thiserror::Error, Debug, Clone)]
pub enum PetFieldError {
    /// A required text field is empty after trimming.
    #[error("{field} is required")]
    Empty {
        /// Human-readable field name.
        field: &'static str,
    },
    /// A text field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Human-readable field name.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
    /// The age is outside the accepted range.
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange {
        /// Minimum accepted age.
        min: i64,
        /// Maximum accepted age.
        max: i64,
    },
    /// The image URL does not parse as a URL.
    #[error("invalid image url")]
    InvalidImageUrl,
}

/// Validates a trimmed text field against a 1..=max length constraint.
fn parse_bounded(
    s: &str,
    field: &'static str,
    max: usize,
) -> Result<String, PetFieldError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(PetFieldError::Empty { field });
    }
    if s.chars().count() > max {
        return Err(PetFieldError::TooLong { field, max });
    }
    Ok(s.to_owned())
}

/// A pet's name (1-100 characters).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PetName(String);

impl PetName {
    /// Maximum length of a pet name.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a `PetName`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than 100
    /// characters.
    pub fn parse(s: &str) -> Result<Self, PetFieldError> {
        parse_bounded(s, "name", Self::MAX_LENGTH).map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The name of a pet's owner (1-100 characters).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OwnerName(String);

impl OwnerName {
    /// Maximum length of an owner name.
    pub const MAX_LENGTH: usize = 100;

    /// Parse an `OwnerName`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than 100
    /// characters.
    pub fn parse(s: &str) -> Result<Self, PetFieldError> {
        parse_bounded(s, "owner name", Self::MAX_LENGTH).map(Self)
    }

    /// Returns the owner name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A pet's age in years (1..=100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PetAge(i32);

impl PetAge {
    /// Minimum accepted age.
    pub const MIN: i64 = 1;
    /// Maximum accepted age.
    pub const MAX: i64 = 100;

    /// Parse a `PetAge` from an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not between 1 and 100 inclusive.
    pub fn parse(age: i64) -> Result<Self, PetFieldError> {
        if !(Self::MIN..=Self::MAX).contains(&age) {
            return Err(PetFieldError::AgeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        #[allow(clippy::cast_possible_truncation)] // bounded to 1..=100 above
        Ok(Self(age as i32))
    }

    /// Get the age as an i32.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

/// Free-form notes about a pet (at most 1000 characters, may be empty).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct PetNotes(String);

impl PetNotes {
    /// Maximum length of pet notes.
    pub const MAX_LENGTH: usize = 1000;

    /// Parse `PetNotes`, trimming surrounding whitespace. Empty input is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is longer than 1000 characters.
    pub fn parse(s: &str) -> Result<Self, PetFieldError> {
        let s = s.trim();
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(PetFieldError::TooLong {
                field: "notes",
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the notes as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A pet's image URL.
///
/// Blank input is accepted and replaced with [`DEFAULT_PET_IMAGE_URL`];
/// anything else must parse as an absolute URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PetImageUrl(String);

impl PetImageUrl {
    /// Parse a `PetImageUrl`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is non-blank but not a valid URL.
    pub fn parse(s: &str) -> Result<Self, PetFieldError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self(DEFAULT_PET_IMAGE_URL.to_owned()));
        }
        url::Url::parse(s).map_err(|_| PetFieldError::InvalidImageUrl)?;
        Ok(Self(s.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the placeholder image rather than a user-provided one.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0 == DEFAULT_PET_IMAGE_URL
    }
}

impl fmt::Display for PetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OwnerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PetAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PetImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SQLx support for text-backed fields (with postgres feature)
macro_rules! impl_pg_text {
    ($name:ident) => {
        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                // Database values are assumed valid
                Ok(Self(s))
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

impl_pg_text!(PetName);
impl_pg_text!(OwnerName);
impl_pg_text!(PetNotes);
impl_pg_text!(PetImageUrl);

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PetAge {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PetAge {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let age = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(age))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PetAge {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_name_valid() {
        let name = PetName::parse("  Benjamin  ").unwrap();
        assert_eq!(name.as_str(), "Benjamin");
        assert!(PetName::parse(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_pet_name_invalid() {
        assert!(matches!(
            PetName::parse("   "),
            Err(PetFieldError::Empty { field: "name" })
        ));
        assert!(matches!(
            PetName::parse(&"a".repeat(101)),
            Err(PetFieldError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_owner_name_required() {
        assert!(OwnerName::parse("John").is_ok());
        assert!(matches!(
            OwnerName::parse(""),
            Err(PetFieldError::Empty { .. })
        ));
    }

    #[test]
    fn test_age_boundaries() {
        assert!(PetAge::parse(1).is_ok());
        assert!(PetAge::parse(100).is_ok());

        assert!(matches!(
            PetAge::parse(0),
            Err(PetFieldError::AgeOutOfRange { .. })
        ));
        assert!(matches!(
            PetAge::parse(-1),
            Err(PetFieldError::AgeOutOfRange { .. })
        ));
        assert!(matches!(
            PetAge::parse(101),
            Err(PetFieldError::AgeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_notes_optional_but_bounded() {
        assert_eq!(PetNotes::parse("").unwrap().as_str(), "");
        assert!(PetNotes::parse(&"n".repeat(1000)).is_ok());
        assert!(matches!(
            PetNotes::parse(&"n".repeat(1001)),
            Err(PetFieldError::TooLong { max: 1000, .. })
        ));
    }

    #[test]
    fn test_blank_image_url_defaults() {
        let url = PetImageUrl::parse("").unwrap();
        assert_eq!(url.as_str(), DEFAULT_PET_IMAGE_URL);
        assert!(url.is_placeholder());

        let url = PetImageUrl::parse("   ").unwrap();
        assert!(url.is_placeholder());
    }

    #[test]
    fn test_image_url_must_be_valid() {
        assert!(PetImageUrl::parse("https://example.com/cat.png").is_ok());
        assert!(matches!(
            PetImageUrl::parse("not a url"),
            Err(PetFieldError::InvalidImageUrl)
        ));
        assert!(matches!(
            PetImageUrl::parse("/relative/path.png"),
            Err(PetFieldError::InvalidImageUrl)
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let age = PetAge::parse(7).unwrap();
        assert_eq!(serde_json::to_string(&age).unwrap(), "7");

        let name = PetName::parse("Milo").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Milo\"");
    }
}
