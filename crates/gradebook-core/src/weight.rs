//! Weight — a grading-category multiplier (e.g. a quiz counts 1, a test 3).

use serde::{Deserialize, Serialize};

opaque_id!(
  /// Identifier of a [`Weight`]; referenced from [`crate::grade::Grade`].
  WeightId
);

/// A named multiplier applied to every grade that references it.
///
/// Invariant: `value > 0`. Enforced by [`crate::mutation::add_weight`] and
/// [`crate::mutation::edit_weight`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
  pub id:    WeightId,
  pub name:  String,
  pub value: f64,
}

impl Weight {
  pub fn new(id: impl Into<WeightId>, name: impl Into<String>, value: f64) -> Self {
    Self { id: id.into(), name: name.into(), value }
  }
}

/// Find a weight by id. With duplicate ids the first one wins.
pub fn find<'a>(weights: &'a [Weight], id: &WeightId) -> Option<&'a Weight> {
  weights.iter().find(|w| &w.id == id)
}
