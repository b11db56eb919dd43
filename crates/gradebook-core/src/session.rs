//! The logged-in session, held as an explicit value rather than ambient state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single active session of a store.
///
/// The bearer token itself is only ever given to the client; the store keeps
/// its digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub email:        String,
  /// Lowercase hex SHA-256 of the bearer token.
  pub token_digest: String,
  pub started_at:   DateTime<Utc>,
}
