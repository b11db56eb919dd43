//! The `UserStore` trait — the persistence contract.
//!
//! The trait is implemented by storage backends (e.g.
//! `gradebook-store-sqlite`). Higher layers depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  session::Session,
  user::{UserMap, UserRecord},
};

/// Abstraction over a key-value store of user records plus a single
/// current-session slot.
///
/// Records are always read and written whole. Nothing here merges concurrent
/// writes: if two writers race, the last one wins.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Whole-store access ────────────────────────────────────────────────

  /// Every record keyed by email. Empty if the store has never been written.
  fn read_all(
    &self,
  ) -> impl Future<Output = Result<UserMap, Self::Error>> + Send + '_;

  /// Replace the entire contents of the store with `users`.
  fn write_all(
    &self,
    users: UserMap,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Single records ────────────────────────────────────────────────────

  /// Retrieve the record for `email`. Returns `None` if not registered.
  fn get_user<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<UserRecord>, Self::Error>> + Send + 'a;

  /// Insert `record`, or replace the existing record with the same email.
  fn put_user(
    &self,
    record: UserRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Session slot ──────────────────────────────────────────────────────

  fn current_session(
    &self,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  /// Make `session` the current one, replacing any previous session.
  fn set_current_session(
    &self,
    session: Session,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn clear_current_session(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
