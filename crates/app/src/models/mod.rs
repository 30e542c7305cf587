//! Domain models for PetFolio.

pub mod pet;
pub mod session;
pub mod user;

pub use pet::{Pet, PetData};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
