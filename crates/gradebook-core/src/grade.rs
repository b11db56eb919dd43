//! Grade — a single recorded or simulated score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::weight::WeightId;

opaque_id!(GradeId);

/// Lowest grade accepted at entry time.
pub const MIN_GRADE: f64 = 1.0;
/// Highest grade accepted at entry time.
pub const MAX_GRADE: f64 = 6.0;

/// A grade as stored in a user's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
  pub id:           GradeId,
  /// Free-text subject name; matched a subject when the grade was added but
  /// is not kept in sync with later renames or deletions.
  pub subject:      String,
  pub value:        f64,
  /// May dangle if the weight was deleted afterwards.
  pub weight_id:    WeightId,
  /// Creation date, formatted by [`format_date`]; never edited.
  pub date:         String,
  /// `true` for a hypothetical grade entered to preview an average.
  pub is_predicted: bool,
}

/// Raw values of the "add grade" form, before validation.
///
/// `value` is kept as text because it is parsed as part of validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeForm {
  pub subject:      String,
  pub value:        String,
  pub weight_id:    String,
  #[serde(default)]
  pub is_predicted: bool,
}

/// Format a creation date the way grades display it: day without padding,
/// zero-padded month, four-digit year (`5.03.2024`).
pub fn format_date(date: NaiveDate) -> String {
  date.format("%-d.%m.%Y").to_string()
}
