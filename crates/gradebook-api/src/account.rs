//! Handlers for `/account` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/account/register` | Body: [`RegistrationForm`]; returns 201 + [`SessionBody`] |
//! | `POST` | `/account/login` | Body: [`LoginForm`]; returns [`SessionBody`] |
//! | `POST` | `/account/logout` | Ends the current session; 204 |
//! | `GET`  | `/account` | The caller's record without the password hash |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gradebook_core::{
  Error,
  account::{self, LoginForm, RegistrationForm},
  store::UserStore,
  user::{UserRecord, UserView},
};
use serde::Serialize;

use crate::{
  auth::{self, CurrentUser},
  error::ApiError,
  form::ApiJson,
};

/// Returned when a session starts. `token` goes in `Authorization: Bearer`.
#[derive(Debug, Serialize)]
pub struct SessionBody {
  pub email: String,
  pub token: String,
}

// ─── Register ─────────────────────────────────────────────────────────────────

/// `POST /account/register` — creates the account with the default catalog
/// and logs it in. Nothing is written if any check fails.
pub async fn register<S: UserStore>(
  State(store): State<Arc<S>>,
  ApiJson(form): ApiJson<RegistrationForm>,
) -> Result<impl IntoResponse, ApiError> {
  let existing = store
    .get_user(&form.email)
    .await
    .map_err(ApiError::store)?;
  account::check_registration(&form, existing.is_some())?;

  let password_hash = auth::hash_password(&form.password)?;
  store
    .put_user(UserRecord::bootstrap(form.email.clone(), password_hash))
    .await
    .map_err(ApiError::store)?;

  let token = auth::start_session(&*store, &form.email).await?;
  tracing::info!(email = %form.email, "registered account");
  Ok((StatusCode::CREATED, Json(SessionBody { email: form.email, token })))
}

// ─── Login / logout ───────────────────────────────────────────────────────────

/// `POST /account/login` — an unknown email and a wrong password are
/// reported identically.
pub async fn login<S: UserStore>(
  State(store): State<Arc<S>>,
  ApiJson(form): ApiJson<LoginForm>,
) -> Result<Json<SessionBody>, ApiError> {
  account::check_login(&form)?;

  let record = store
    .get_user(&form.email)
    .await
    .map_err(ApiError::store)?
    .filter(|r| auth::verify_password(&form.password, &r.password_hash))
    .ok_or(Error::InvalidCredentials)?;

  let token = auth::start_session(&*store, &record.email).await?;
  tracing::info!(email = %record.email, "logged in");
  Ok(Json(SessionBody { email: record.email, token }))
}

/// `POST /account/logout`
pub async fn logout<S: UserStore>(
  State(store): State<Arc<S>>,
  user: CurrentUser,
) -> Result<StatusCode, ApiError> {
  store
    .clear_current_session()
    .await
    .map_err(ApiError::store)?;
  tracing::info!(email = %user.session.email, "logged out");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /account`
pub async fn me(user: CurrentUser) -> Json<UserView> { Json(user.record.view()) }
