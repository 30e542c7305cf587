//! Seed the database with demo data.
//!
//! Creates (or reuses) a demo account and gives it a couple of pets, so a
//! fresh environment has something to look at.

use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use petfolio_app::db::{PetRepository, UserRepository};
use petfolio_app::models::PetData;
use petfolio_app::services::auth::{AuthError, AuthService};
use petfolio_core::Email;

const DEMO_PETS: &[(&str, &str, i32, &str)] = &[
    ("Benjamin", "John", 2, "Allergic to peanuts."),
    ("Luna", "Maria", 5, ""),
    ("Rex", "Sam", 8, "Prefers the garden."),
];

/// Create a demo account with a handful of pets.
///
/// Idempotent for the account itself: if the email already exists, the
/// existing account is reused. Pets are only added when the account has none.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the credentials are
/// invalid.
pub async fn demo_account(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PETFOLIO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "PETFOLIO_DATABASE_URL not set")?;

    let pool = petfolio_app::db::create_pool(&database_url).await?;
    seed_demo(&pool, email, password).await
}

async fn seed_demo(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let auth = AuthService::new(pool);

    let user = match auth.register_with_password(email, password).await {
        Ok(user) => {
            info!(user_id = %user.id, "Demo account created");
            user
        }
        Err(AuthError::UserAlreadyExists) => {
            let parsed = Email::parse(email)?;
            let existing = UserRepository::new(pool)
                .get_by_email(&parsed)
                .await?
                .ok_or("account vanished between lookup and reuse")?;
            info!(user_id = %existing.id, "Demo account already exists, reusing");
            existing
        }
        Err(e) => return Err(e.into()),
    };

    let pets = PetRepository::new(pool);
    if !pets.list_for_user(user.id).await?.is_empty() {
        info!("Demo account already has pets, nothing to do");
        return Ok(());
    }

    for (name, owner, age, notes) in DEMO_PETS {
        let data = PetData::parse(name, owner, "", i64::from(*age), notes)?;
        let pet = pets.create(user.id, &data).await?;
        info!(pet_id = %pet.id, name = %data.name, "Seeded pet");
    }

    info!("Seeding complete!");
    Ok(())
}
