//! Handlers for `/grades` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/grades` | All grades in insertion order |
//! | `GET`    | `/grades/by-subject` | Grades grouped by subject name, first-seen order |
//! | `POST`   | `/grades` | Body: [`GradeBody`]; returns 201 + new list |
//! | `DELETE` | `/grades/{id}` | Returns new list |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Local;
use gradebook_core::{
  aggregate,
  grade::{Grade, GradeForm, GradeId},
  mutation,
  store::UserStore,
};
use serde::Serialize;

use crate::{
  auth::CurrentUser,
  error::ApiError,
  form::{ApiJson, GradeBody},
};

/// `GET /grades`
pub async fn list(user: CurrentUser) -> Json<Vec<Grade>> { Json(user.record.grades) }

/// One bucket of `GET /grades/by-subject`.
#[derive(Debug, Serialize)]
pub struct SubjectGroup {
  pub subject: String,
  pub grades:  Vec<Grade>,
}

/// `GET /grades/by-subject`
pub async fn by_subject(user: CurrentUser) -> Json<Vec<SubjectGroup>> {
  let groups = aggregate::group_by_subject(&user.record.grades)
    .into_iter()
    .map(|(subject, grades)| SubjectGroup {
      subject: subject.to_owned(),
      grades:  grades.into_iter().cloned().collect(),
    })
    .collect();
  Json(groups)
}

/// `POST /grades` — the grade is dated with the server's local date.
pub async fn create<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  ApiJson(body): ApiJson<GradeBody>,
) -> Result<impl IntoResponse, ApiError> {
  let form = GradeForm::from(body);
  record.grades = mutation::add_grade(&record.grades, &form, Local::now().date_naive())?;
  let grades = record.grades.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(subject = %form.subject, predicted = form.is_predicted, "grade added");
  Ok((StatusCode::CREATED, Json(grades)))
}

/// `DELETE /grades/{id}`
pub async fn delete<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  Path(id): Path<GradeId>,
) -> Result<Json<Vec<Grade>>, ApiError> {
  record.grades = mutation::delete_grade(&record.grades, &id);
  let grades = record.grades.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(%id, "grade deleted");
  Ok(Json(grades))
}
