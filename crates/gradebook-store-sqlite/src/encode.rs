//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. The weight, subject, and grade
//! collections are stored as compact JSON arrays.

use chrono::{DateTime, Utc};
use gradebook_core::{session::Session, user::UserRecord};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Collections ─────────────────────────────────────────────────────────────

pub fn encode_collection<T: Serialize>(items: &[T]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_collection<T: DeserializeOwned>(s: &str) -> Result<Vec<T>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings for one `users` row, in either direction.
pub struct RawUser {
  pub email:         String,
  pub password_hash: String,
  pub weights:       String,
  pub subjects:      String,
  pub grades:        String,
}

impl RawUser {
  pub fn from_record(record: &UserRecord) -> Result<Self> {
    Ok(Self {
      email:         record.email.clone(),
      password_hash: record.password_hash.clone(),
      weights:       encode_collection(&record.weights)?,
      subjects:      encode_collection(&record.subjects)?,
      grades:        encode_collection(&record.grades)?,
    })
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      email:         row.get(0)?,
      password_hash: row.get(1)?,
      weights:       row.get(2)?,
      subjects:      row.get(3)?,
      grades:        row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<UserRecord> {
    Ok(UserRecord {
      email:         self.email,
      password_hash: self.password_hash,
      weights:       decode_collection(&self.weights)?,
      subjects:      decode_collection(&self.subjects)?,
      grades:        decode_collection(&self.grades)?,
    })
  }
}

/// Raw strings read directly from the `current_session` row.
pub struct RawSession {
  pub email:        String,
  pub token_digest: String,
  pub started_at:   String,
}

impl RawSession {
  pub fn into_session(self) -> Result<Session> {
    Ok(Session {
      email:        self.email,
      token_digest: self.token_digest,
      started_at:   decode_dt(&self.started_at)?,
    })
  }
}
