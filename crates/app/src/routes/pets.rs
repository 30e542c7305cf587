//! Pet CRUD route handlers.
//!
//! Every handler here requires an authenticated session, and mutating
//! handlers verify the pet belongs to the current user before touching it.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use petfolio_core::PetId;

use crate::db::PetRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{Pet, PetData};
use crate::state::AppState;

/// Raw pet form fields, as submitted by the browser.
///
/// `age` arrives as text and is parsed here; everything else is validated by
/// [`PetData::parse`].
#[derive(Debug, Deserialize)]
pub struct PetForm {
    pub name: String,
    pub owner_name: String,
    #[serde(default)]
    pub image_url: String,
    pub age: String,
    #[serde(default)]
    pub notes: String,
}

impl PetForm {
    fn into_data(self) -> Result<PetData, AppError> {
        let age: i64 = self
            .age
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Invalid pet data: age must be a whole number".to_owned()))?;

        PetData::parse(&self.name, &self.owner_name, &self.image_url, age, &self.notes)
            .map_err(|e| AppError::Validation(format!("Invalid pet data: {e}")))
    }
}

/// JSON shape of a pet as returned by the list endpoint.
#[derive(Debug, Serialize)]
pub struct PetView {
    pub id: String,
    pub name: String,
    pub owner_name: String,
    pub image_url: String,
    pub age: i32,
    pub notes: String,
}

impl From<Pet> for PetView {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            name: pet.name.as_str().to_owned(),
            owner_name: pet.owner_name.as_str().to_owned(),
            image_url: pet.image_url.as_str().to_owned(),
            age: pet.age.as_i32(),
            notes: pet.notes.as_str().to_owned(),
        }
    }
}

/// List the current user's pets, oldest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
) -> Result<Json<Vec<PetView>>, AppError> {
    let pets = PetRepository::new(state.pool())
        .list_for_user(current_user.id)
        .await?;

    Ok(Json(pets.into_iter().map(PetView::from).collect()))
}

/// Create a new pet for the current user.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    axum::Form(form): axum::Form<PetForm>,
) -> Result<Response, AppError> {
    let data = form.into_data()?;

    let pet = PetRepository::new(state.pool())
        .create(current_user.id, &data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create pet: {e}");
            AppError::Persistence("Could not add pet".to_owned())
        })?;

    tracing::info!(pet_id = %pet.id, user_id = %current_user.id, "Pet created");
    Ok(Redirect::to("/app/pets").into_response())
}

/// Update an existing pet owned by the current user.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(id): Path<String>,
    axum::Form(form): axum::Form<PetForm>,
) -> Result<Response, AppError> {
    let repo = PetRepository::new(state.pool());
    let pet = find_owned_pet(&repo, &id, &current_user).await?;
    let data = form.into_data()?;

    repo.update(pet.id, &data).await.map_err(|e| {
        tracing::error!(pet_id = %pet.id, "Failed to update pet: {e}");
        AppError::Persistence("Could not edit pet".to_owned())
    })?;

    Ok(Redirect::to("/app/pets").into_response())
}

/// Delete a pet owned by the current user.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let repo = PetRepository::new(state.pool());
    let pet = find_owned_pet(&repo, &id, &current_user).await?;

    repo.delete(pet.id).await.map_err(|e| {
        tracing::error!(pet_id = %pet.id, "Failed to delete pet: {e}");
        AppError::Persistence("Could not delete pet".to_owned())
    })?;

    tracing::info!(pet_id = %pet.id, user_id = %current_user.id, "Pet deleted");
    Ok(Redirect::to("/app/pets").into_response())
}

/// Look up a pet by its raw path id and verify it belongs to `current_user`.
///
/// A malformed id is a validation error, a missing pet is not found, and a
/// pet owned by someone else is unauthorized. The unauthorized case is
/// deliberately distinct from not-found so an owner mismatch is visible in
/// logs.
async fn find_owned_pet(
    repo: &PetRepository<'_>,
    raw_id: &str,
    current_user: &crate::models::CurrentUser,
) -> Result<Pet, AppError> {
    let id = PetId::parse(raw_id).map_err(|_| AppError::Validation("Invalid pet id".to_owned()))?;

    let pet = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Pet not found".to_owned()))?;

    if pet.user_id != current_user.id {
        tracing::warn!(pet_id = %id, user_id = %current_user.id, "Pet ownership check failed");
        return Err(AppError::Unauthorized);
    }

    Ok(pet)
}
