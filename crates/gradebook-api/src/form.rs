//! Request bodies for the mutation endpoints.
//!
//! Fields mirror what a form submits. Missing fields default to empty so that
//! the core validation, not the JSON extractor, reports what is wrong.

use axum::extract::FromRequest;
use gradebook_core::grade::GradeForm;
use serde::Deserialize;

use crate::error::ApiError;

/// [`axum::Json`] whose rejections (malformed JSON, wrong content type, a
/// body that does not fit the target type) are reported as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// A numeric form field, accepted as a JSON number or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
  Number(f64),
  Text(String),
}

impl Default for FormNumber {
  fn default() -> Self { Self::Text(String::new()) }
}

impl FormNumber {
  /// The raw text handed to the core parser.
  pub fn into_raw(self) -> String {
    match self {
      Self::Number(n) => n.to_string(),
      Self::Text(s) => s,
    }
  }
}

/// Body of `POST /weights` and `PUT /weights/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeightBody {
  pub name:  String,
  pub value: FormNumber,
}

/// Body of `POST /subjects` and `PUT /subjects/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubjectBody {
  pub name: String,
}

/// Body of `POST /grades`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GradeBody {
  pub subject:      String,
  pub value:        FormNumber,
  pub weight_id:    String,
  pub is_predicted: bool,
}

impl From<GradeBody> for GradeForm {
  fn from(b: GradeBody) -> Self {
    GradeForm {
      subject:      b.subject,
      value:        b.value.into_raw(),
      weight_id:    b.weight_id,
      is_predicted: b.is_predicted,
    }
  }
}
