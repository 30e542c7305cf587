//! Account and billing route handlers.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::services::auth::AuthService;
use crate::state::AppState;
use crate::stripe::StripeError;

/// JSON shape of the account summary.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub email: String,
    pub has_access: bool,
}

/// Show the current user's account summary.
///
/// The access flag is read fresh from the database rather than the session,
/// so a completed payment shows up on the next page load.
pub async fn account(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
) -> Result<Json<AccountView>, AppError> {
    let user = AuthService::new(state.pool()).get_user(current_user.id).await?;

    Ok(Json(AccountView {
        email: user.email.as_str().to_owned(),
        has_access: user.has_access,
    }))
}

/// Start a Stripe Checkout session for the lifetime-access purchase and
/// redirect the user to Stripe's hosted payment page.
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
) -> Result<Response, AppError> {
    let base_url = &state.config().base_url;
    let success_url = format!("{base_url}/payment?success=true");
    let cancel_url = format!("{base_url}/payment?cancelled=true");

    let session = state
        .stripe()
        .create_checkout_session(&current_user.email, &success_url, &cancel_url)
        .await
        .inspect_err(|e| tracing::error!("Failed to create checkout session: {e}"))?;

    let url = session.url.ok_or(StripeError::MissingRedirectUrl)?;

    tracing::info!(user_id = %current_user.id, session_id = %session.id, "Checkout session created");
    Ok(Redirect::to(&url).into_response())
}
