//! Pet repository for database operations.
//!
//! Ownership checks are deliberately NOT performed here; handlers load the pet
//! and compare its owner against the session user before mutating.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use petfolio_core::{OwnerName, PetAge, PetId, PetImageUrl, PetName, PetNotes, UserId};

use super::RepositoryError;
use crate::models::pet::{Pet, PetData};

/// Raw `pets` row as stored in `PostgreSQL`.
#[derive(sqlx::FromRow)]
struct PetRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    owner_name: String,
    image_url: String,
    age: i32,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PetRow {
    fn into_pet(self) -> Result<Pet, RepositoryError> {
        let corrupt = |e: petfolio_core::PetFieldError| {
            RepositoryError::DataCorruption(format!("invalid pet field in database: {e}"))
        };

        Ok(Pet {
            id: PetId::new(self.id),
            user_id: UserId::new(self.user_id),
            name: PetName::parse(&self.name).map_err(corrupt)?,
            owner_name: OwnerName::parse(&self.owner_name).map_err(corrupt)?,
            image_url: PetImageUrl::parse(&self.image_url).map_err(corrupt)?,
            age: PetAge::parse(i64::from(self.age)).map_err(corrupt)?,
            notes: PetNotes::parse(&self.notes).map_err(corrupt)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for pet database operations.
pub struct PetRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PetRepository<'a> {
    /// Create a new pet repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all pets owned by a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Pet>, RepositoryError> {
        let rows = sqlx::query_as::<_, PetRow>(
            r"
            SELECT id, user_id, name, owner_name, image_url, age, notes,
                   created_at, updated_at
            FROM pets
            WHERE user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PetRow::into_pet).collect()
    }

    /// Get a pet by its ID, regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: PetId) -> Result<Option<Pet>, RepositoryError> {
        let row = sqlx::query_as::<_, PetRow>(
            r"
            SELECT id, user_id, name, owner_name, image_url, age, notes,
                   created_at, updated_at
            FROM pets
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        row.map(PetRow::into_pet).transpose()
    }

    /// Create a pet owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: UserId, data: &PetData) -> Result<Pet, RepositoryError> {
        let row = sqlx::query_as::<_, PetRow>(
            r"
            INSERT INTO pets (user_id, name, owner_name, image_url, age, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, owner_name, image_url, age, notes,
                      created_at, updated_at
            ",
        )
        .bind(user_id.as_uuid())
        .bind(data.name.as_str())
        .bind(data.owner_name.as_str())
        .bind(data.image_url.as_str())
        .bind(data.age.as_i32())
        .bind(data.notes.as_str())
        .fetch_one(self.pool)
        .await?;

        row.into_pet()
    }

    /// Replace a pet's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the pet doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: PetId, data: &PetData) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE pets
            SET name = $1, owner_name = $2, image_url = $3, age = $4, notes = $5,
                updated_at = NOW()
            WHERE id = $6
            ",
        )
        .bind(data.name.as_str())
        .bind(data.owner_name.as_str())
        .bind(data.image_url.as_str())
        .bind(data.age.as_i32())
        .bind(data.notes.as_str())
        .bind(id.as_uuid())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a pet by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the pet doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: PetId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM pets
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
