//! Pet domain types.

use chrono::{DateTime, Utc};

use petfolio_core::{OwnerName, PetAge, PetFieldError, PetId, PetImageUrl, PetName, PetNotes, UserId};

/// A shelter pet record (domain type). Always belongs to exactly one user.
#[derive(Debug, Clone)]
pub struct Pet {
    /// Unique pet ID.
    pub id: PetId,
    /// Owning user.
    pub user_id: UserId,
    /// The pet's name.
    pub name: PetName,
    /// The name of the pet's owner.
    pub owner_name: OwnerName,
    /// Image URL (placeholder when none was provided).
    pub image_url: PetImageUrl,
    /// Age in years.
    pub age: PetAge,
    /// Free-form notes, possibly empty.
    pub notes: PetNotes,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A validated pet payload, ready to persist.
///
/// Constructed only via [`PetData::parse`], so every field satisfies its
/// constraints.
#[derive(Debug, Clone)]
pub struct PetData {
    pub name: PetName,
    pub owner_name: OwnerName,
    pub image_url: PetImageUrl,
    pub age: PetAge,
    pub notes: PetNotes,
}

impl PetData {
    /// Validate raw form fields into a `PetData`.
    ///
    /// # Errors
    ///
    /// Returns the first field constraint violation encountered.
    pub fn parse(
        name: &str,
        owner_name: &str,
        image_url: &str,
        age: i64,
        notes: &str,
    ) -> Result<Self, PetFieldError> {
        Ok(Self {
            name: PetName::parse(name)?,
            owner_name: OwnerName::parse(owner_name)?,
            image_url: PetImageUrl::parse(image_url)?,
            age: PetAge::parse(age)?,
            notes: PetNotes::parse(notes)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_payload() {
        let data = PetData::parse("Benjamin", "John", "", 2, "Allergic to peanuts.").unwrap();
        assert_eq!(data.name.as_str(), "Benjamin");
        assert!(data.image_url.is_placeholder());
    }

    #[test]
    fn test_parse_rejects_bad_age() {
        assert!(PetData::parse("Benjamin", "John", "", 0, "").is_err());
        assert!(PetData::parse("Benjamin", "John", "", 101, "").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_image_url() {
        assert!(PetData::parse("Benjamin", "John", "nope", 2, "").is_err());
    }
}
