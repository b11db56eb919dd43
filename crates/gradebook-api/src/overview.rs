//! Handler for `GET /overview`: the weighted averages read model.

use axum::Json;
use gradebook_core::aggregate::Overview;

use crate::auth::CurrentUser;

/// `GET /overview`
pub async fn handler(user: CurrentUser) -> Json<Overview> {
  let record = &user.record;
  Json(Overview::compute(&record.grades, &record.weights))
}
