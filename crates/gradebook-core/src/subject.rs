//! Subject — a named course that grades are filed under.
//!
//! Grades reference subjects by *name*, not by id, so renaming a subject
//! leaves existing grades under the old name.

use serde::{Deserialize, Serialize};

opaque_id!(SubjectId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:   SubjectId,
  /// Unique within one user's collection, compared case-insensitively.
  pub name: String,
}

impl Subject {
  pub fn new(id: impl Into<SubjectId>, name: impl Into<String>) -> Self {
    Self { id: id.into(), name: name.into() }
  }

  /// Case-insensitive name comparison used for the uniqueness rule.
  pub fn has_name(&self, name: &str) -> bool {
    self.name.to_lowercase() == name.to_lowercase()
  }
}
