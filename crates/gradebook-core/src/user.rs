//! The per-user aggregate root.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  account::{default_subjects, default_weights},
  grade::Grade,
  subject::Subject,
  weight::Weight,
};

/// Everything stored for one account. The record exclusively owns its three
/// collections; every mutation replaces the record as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
  /// Login name and storage key.
  pub email:         String,
  /// Argon2 PHC string; plaintext passwords are never stored.
  pub password_hash: String,
  pub weights:       Vec<Weight>,
  pub subjects:      Vec<Subject>,
  pub grades:        Vec<Grade>,
}

impl UserRecord {
  /// A freshly registered account: the default weight and subject catalog and
  /// no grades.
  pub fn bootstrap(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
    Self {
      email:         email.into(),
      password_hash: password_hash.into(),
      weights:       default_weights(),
      subjects:      default_subjects(),
      grades:        Vec::new(),
    }
  }

  /// The record as shown to its owner, without the password hash.
  pub fn view(&self) -> UserView {
    UserView {
      email:    self.email.clone(),
      weights:  self.weights.clone(),
      subjects: self.subjects.clone(),
      grades:   self.grades.clone(),
    }
  }
}

/// Public projection of a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
  pub email:    String,
  pub weights:  Vec<Weight>,
  pub subjects: Vec<Subject>,
  pub grades:   Vec<Grade>,
}

/// The full store contents: email → record.
pub type UserMap = BTreeMap<String, UserRecord>;
