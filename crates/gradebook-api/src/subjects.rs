//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | The caller's subject catalog |
//! | `POST`   | `/subjects` | Body: `{"name":"..."}`; returns 201 + new catalog |
//! | `PUT`    | `/subjects/{id}` | Rename; existing grades keep the old name |
//! | `DELETE` | `/subjects/{id}` | Grades are not touched |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use gradebook_core::{
  mutation,
  store::UserStore,
  subject::{Subject, SubjectId},
};

use crate::{
  auth::CurrentUser,
  error::ApiError,
  form::{ApiJson, SubjectBody},
};

/// `GET /subjects`
pub async fn list(user: CurrentUser) -> Json<Vec<Subject>> { Json(user.record.subjects) }

/// `POST /subjects`
pub async fn create<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  ApiJson(body): ApiJson<SubjectBody>,
) -> Result<impl IntoResponse, ApiError> {
  record.subjects = mutation::add_subject(&record.subjects, &body.name)?;
  let subjects = record.subjects.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(name = %body.name.trim(), "subject added");
  Ok((StatusCode::CREATED, Json(subjects)))
}

/// `PUT /subjects/{id}`
pub async fn rename<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  Path(id): Path<SubjectId>,
  ApiJson(body): ApiJson<SubjectBody>,
) -> Result<Json<Vec<Subject>>, ApiError> {
  record.subjects = mutation::rename_subject(&record.subjects, &id, &body.name)?;
  let subjects = record.subjects.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(%id, "subject renamed");
  Ok(Json(subjects))
}

/// `DELETE /subjects/{id}`
pub async fn delete<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  Path(id): Path<SubjectId>,
) -> Result<Json<Vec<Subject>>, ApiError> {
  record.subjects = mutation::delete_subject(&record.subjects, &id);
  let subjects = record.subjects.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(%id, "subject deleted");
  Ok(Json(subjects))
}
