//! Core types for PetFolio.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod pet;

pub use email::{Email, EmailError};
pub use id::*;
pub use pet::{
    DEFAULT_PET_IMAGE_URL, OwnerName, PetAge, PetFieldError, PetImageUrl, PetName, PetNotes,
};
