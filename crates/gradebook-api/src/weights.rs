//! Handlers for `/weights` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/weights` | The caller's weight catalog |
//! | `POST`   | `/weights` | Body: [`WeightBody`]; returns 201 + new catalog |
//! | `PUT`    | `/weights/{id}` | Body: [`WeightBody`]; returns new catalog |
//! | `DELETE` | `/weights/{id}` | Grades using the weight are kept; returns new catalog |

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
  weight::{Weight, WeightId},
};

use crate::{
  auth::CurrentUser,
  error::ApiError,
  form::{ApiJson, WeightBody},
};

/// `GET /weights`
pub async fn list(user: CurrentUser) -> Json<Vec<Weight>> { Json(user.record.weights) }

/// `POST /weights`
pub async fn create<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  ApiJson(body): ApiJson<WeightBody>,
) -> Result<impl IntoResponse, ApiError> {
  record.weights = mutation::add_weight(&record.weights, &body.name, &body.value.into_raw())?;
  let weights = record.weights.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(count = weights.len(), "weight added");
  Ok((StatusCode::CREATED, Json(weights)))
}

/// `PUT /weights/{id}`
pub async fn update<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  Path(id): Path<WeightId>,
  ApiJson(body): ApiJson<WeightBody>,
) -> Result<Json<Vec<Weight>>, ApiError> {
  record.weights =
    mutation::edit_weight(&record.weights, &id, &body.name, &body.value.into_raw())?;
  let weights = record.weights.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(%id, "weight edited");
  Ok(Json(weights))
}

/// `DELETE /weights/{id}`
pub async fn delete<S: UserStore>(
  State(store): State<Arc<S>>,
  CurrentUser { mut record, .. }: CurrentUser,
  Path(id): Path<WeightId>,
) -> Result<Json<Vec<Weight>>, ApiError> {
  record.weights = mutation::delete_weight(&record.weights, &id);
  let weights = record.weights.clone();
  store.put_user(record).await.map_err(ApiError::store)?;
  tracing::debug!(%id, "weight deleted");
  Ok(Json(weights))
}
