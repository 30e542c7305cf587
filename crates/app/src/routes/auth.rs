//! Authentication route handlers.
//!
//! Handles signup, login, and logout. Successful actions start (or end) a
//! session and redirect; failures come back as `{"message"}` bodies via
//! [`AppError`].

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Credentials form data, shared by signup and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// Handle signup form submission.
///
/// Validates the credentials, hashes the password, creates the user, and logs
/// them straight in. A duplicate email surfaces as a conflict message and no
/// row is created.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    let user = auth
        .register_with_password(&form.email, &form.password)
        .await
        .inspect_err(|e| tracing::warn!("Signup failed: {e}"))?;

    start_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "New account created");
    Ok(Redirect::to("/app/dashboard").into_response())
}

/// Handle login form submission.
///
/// Credential verification is delegated to the auth service; both unknown
/// emails and wrong passwords collapse into the same invalid-credentials
/// message.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    let user = auth
        .login_with_password(&form.email, &form.password)
        .await
        .inspect_err(|e| tracing::warn!("Login failed: {e}"))?;

    start_session(&session, &user).await?;

    Ok(Redirect::to("/app/dashboard").into_response())
}

/// Handle logout.
///
/// Clears the session entirely and redirects home.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();

    Redirect::to("/").into_response()
}

/// Store the user's identity in the session after authentication.
async fn start_session(session: &Session, user: &crate::models::User) -> Result<(), AppError> {
    // Rotate the session id to prevent fixation
    if let Err(e) = session.cycle_id().await {
        tracing::error!("Failed to cycle session id: {e}");
    }

    let current = CurrentUser::from_user(user);
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}
