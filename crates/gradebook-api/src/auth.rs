//! Password hashing, session tokens, and the [`CurrentUser`] extractor.
//!
//! A successful login or registration hands the client a random bearer token
//! and stores only its SHA-256 digest in the store's single session slot.
//! Every authenticated request resolves that slot into an explicit
//! [`CurrentUser`] value.

use std::sync::Arc;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use gradebook_core::{session::Session, store::UserStore, user::UserRecord};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::error::ApiError;

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash `password` into an argon2 PHC string (`$argon2id$v=19$…`).
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::PasswordHash(e.to_string()))
}

/// `true` iff `password` matches the stored PHC string. A malformed hash never
/// matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
  PasswordHash::new(password_hash)
    .map(|parsed| {
      Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
    })
    .unwrap_or(false)
}

// ─── Session tokens ──────────────────────────────────────────────────────────

/// 32 random bytes, base64url without padding.
pub fn generate_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  URL_SAFE_NO_PAD.encode(bytes)
}

/// Lowercase hex SHA-256 of `token`, as kept in [`Session::token_digest`].
pub fn token_digest(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

/// Start a new session for `email`, replacing any current one, and return the
/// bearer token for the client.
pub async fn start_session<S: UserStore>(store: &S, email: &str) -> Result<String, ApiError> {
  let token = generate_token();
  let session = Session {
    email:        email.to_owned(),
    token_digest: token_digest(&token),
    started_at:   Utc::now(),
  };
  store
    .set_current_session(session)
    .await
    .map_err(ApiError::store)?;
  Ok(token)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The authenticated user of a request: the live session and the user's
/// record as loaded at the start of the request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
  pub session: Session,
  pub record:  UserRecord,
}

impl<S> FromRequestParts<Arc<S>> for CurrentUser
where
  S: UserStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    store: &Arc<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)
      .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;
    let digest = token_digest(token);

    let session = store
      .current_session()
      .await
      .map_err(ApiError::store)?
      .filter(|s| s.token_digest == digest)
      .ok_or_else(|| ApiError::Unauthorized("no active session for this token".into()))?;

    let record = store
      .get_user(&session.email)
      .await
      .map_err(ApiError::store)?
      .ok_or_else(|| ApiError::Unauthorized(format!("account {} no longer exists", session.email)))?;

    Ok(CurrentUser { session, record })
  }
}
