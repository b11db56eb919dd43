//! Error types for `gradebook-core`.
//!
//! Every variant's `Display` output is the reason string handed back to the
//! caller; none of them is fatal and none implies a state change.

use thiserror::Error;

use crate::{subject::SubjectId, weight::WeightId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  // ── Weights ─────────────────────────────────────────────────────────────
  #[error("weight name must not be empty")]
  EmptyWeightName,

  #[error("weight value must be a number greater than 0, got {0:?}")]
  InvalidWeightValue(String),

  #[error("weight not found: {0}")]
  WeightNotFound(WeightId),

  // ── Subjects ────────────────────────────────────────────────────────────
  #[error("subject name must not be empty")]
  EmptySubjectName,

  #[error("a subject named {0:?} already exists")]
  DuplicateSubject(String),

  #[error("subject not found: {0}")]
  SubjectNotFound(SubjectId),

  // ── Grades ──────────────────────────────────────────────────────────────
  #[error("a subject must be selected")]
  SubjectNotSelected,

  #[error("grade must be a number from 1 to 6, got {0:?}")]
  InvalidGradeValue(String),

  #[error("a weight must be selected")]
  WeightNotSelected,

  // ── Accounts ────────────────────────────────────────────────────────────
  #[error("email and password are required")]
  MissingCredentials,

  #[error("passwords do not match")]
  PasswordMismatch,

  #[error("password must be at least {min} characters long")]
  PasswordTooShort { min: usize },

  #[error("an account for {0} already exists")]
  EmailTaken(String),

  #[error("invalid email or password")]
  InvalidCredentials,
}

impl Error {
  /// Whether the error names an entity that does not exist.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::WeightNotFound(_) | Self::SubjectNotFound(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
