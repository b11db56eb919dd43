//! Error type for `gradebook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("user map key {key:?} does not match record email {email:?}")]
  KeyMismatch { key: String, email: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
