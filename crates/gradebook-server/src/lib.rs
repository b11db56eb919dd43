//! HTTP host for the gradebook API.
//!
//! Mounts [`gradebook_api::api_router`] under `/api` with request tracing,
//! backed by any [`UserStore`].

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use gradebook_core::store::UserStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GRADEBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub const DEFAULT_HOST: &'static str = "127.0.0.1";
  pub const DEFAULT_PORT: u16 = 8080;
  pub const DEFAULT_STORE_PATH: &'static str = "gradebook.sqlite3";
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`]: the JSON API under `/api`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: UserStore + 'static,
{
  Router::new()
    .nest("/api", gradebook_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use gradebook_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    token:  Option<&str>,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp   = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes  = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value  = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
      app,
      "POST",
      "/api/account/register",
      None,
      Some(json!({
        "email": email,
        "password": "sekret123",
        "confirm_password": "sekret123",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().unwrap().to_owned()
  }

  // ── Account ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn registration_bootstraps_default_catalog() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;

    let (status, body) = send(&app, "GET", "/api/account", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ala@example.com");
    assert_eq!(body["weights"].as_array().unwrap().len(), 3);
    assert_eq!(body["subjects"].as_array().unwrap().len(), 5);
    assert_eq!(body["grades"].as_array().unwrap().len(), 0);
    assert!(body.get("password_hash").is_none());
  }

  #[tokio::test]
  async fn registration_rejections() {
    let app = app().await;
    register(&app, "ala@example.com").await;

    let cases = [
      (json!({"email": "", "password": "x", "confirm_password": "x"}), StatusCode::BAD_REQUEST),
      (
        json!({"email": "b@example.com", "password": "sekret123", "confirm_password": "other123"}),
        StatusCode::BAD_REQUEST,
      ),
      (json!({"email": "b@example.com", "password": "abc", "confirm_password": "abc"}), StatusCode::BAD_REQUEST),
      (
        json!({"email": "ala@example.com", "password": "sekret123", "confirm_password": "sekret123"}),
        StatusCode::CONFLICT,
      ),
    ];
    for (body, expected) in cases {
      let (status, resp) = send(&app, "POST", "/api/account/register", None, Some(body)).await;
      assert_eq!(status, expected, "{resp}");
      assert!(resp["error"].is_string());
    }

    // Failed registrations leave no account behind.
    let (status, _) = send(
      &app,
      "POST",
      "/api/account/login",
      None,
      Some(json!({"email": "b@example.com", "password": "sekret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn login_failures_are_indistinguishable() {
    let app = app().await;
    register(&app, "ala@example.com").await;

    let (s1, wrong_pw) = send(
      &app,
      "POST",
      "/api/account/login",
      None,
      Some(json!({"email": "ala@example.com", "password": "nope-nope"})),
    )
    .await;
    let (s2, unknown) = send(
      &app,
      "POST",
      "/api/account/login",
      None,
      Some(json!({"email": "kto@example.com", "password": "nope-nope"})),
    )
    .await;
    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, unknown);
  }

  #[tokio::test]
  async fn requests_without_valid_token_are_rejected() {
    let app = app().await;
    register(&app, "ala@example.com").await;

    let (status, _) = send(&app, "GET", "/api/grades", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/grades", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn login_replaces_previous_session() {
    let app   = app().await;
    let first = register(&app, "ala@example.com").await;

    let (status, body) = send(
      &app,
      "POST",
      "/api/account/login",
      None,
      Some(json!({"email": "ala@example.com", "password": "sekret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let second = body["token"].as_str().unwrap();

    let (status, _) = send(&app, "GET", "/api/account", Some(first.as_str()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/api/account", Some(second), None).await;
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn logout_ends_session() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;

    let (status, _) = send(&app, "POST", "/api/account/logout", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/account", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  // ── Weights ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn weight_crud() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;
    let t     = Some(token.as_str());

    let (status, body) =
      send(&app, "POST", "/api/weights", t, Some(json!({"name": " Odpowiedź ", "value": "2"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(body[3]["name"], "Odpowiedź");

    let (status, _) =
      send(&app, "POST", "/api/weights", t, Some(json!({"name": "Zero", "value": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
      send(&app, "PUT", "/api/weights/2", t, Some(json!({"name": "Test", "value": 4}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1], json!({"id": "2", "name": "Test", "value": 4.0}));

    let (status, _) =
      send(&app, "PUT", "/api/weights/nope", t, Some(json!({"name": "Test", "value": 4}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/api/weights/nope", t, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, body) = send(&app, "DELETE", "/api/weights/1", t, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/api/weights", t, None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
  }

  // ── Subjects ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn subject_uniqueness_and_rename() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;
    let t     = Some(token.as_str());

    let (status, body) =
      send(&app, "POST", "/api/subjects", t, Some(json!({"name": "polski"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, body) = send(&app, "GET", "/api/subjects", t, None).await;
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, body) =
      send(&app, "PUT", "/api/subjects/1", t, Some(json!({"name": "Matma"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Matma");

    let (status, _) =
      send(&app, "PUT", "/api/subjects/99", t, Some(json!({"name": "Fizyka"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn subject_rename_keeps_grade_subject_names() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;
    let t     = Some(token.as_str());

    let (status, _) = send(
      &app,
      "POST",
      "/api/grades",
      t,
      Some(json!({"subject": "Matematyka", "value": 5, "weight_id": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, subjects) =
      send(&app, "PUT", "/api/subjects/1", t, Some(json!({"name": "Matma"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(subjects[0]["name"], "Matma");

    let (_, grades) = send(&app, "GET", "/api/grades", t, None).await;
    assert_eq!(grades[0]["subject"], "Matematyka");

    let (_, groups) = send(&app, "GET", "/api/grades/by-subject", t, None).await;
    assert_eq!(groups.as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["subject"], "Matematyka");
    assert_eq!(groups[0]["grades"].as_array().unwrap().len(), 1);
  }

  // ── Request bodies ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unreadable_bodies_use_error_shape() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;

    let raw = |content_type: Option<&str>, body: &str| {
      let mut builder = Request::builder()
        .method("POST")
        .uri("/api/weights")
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
      if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
      }
      builder.body(Body::from(body.to_owned())).unwrap()
    };

    for req in [
      raw(Some("application/json"), "{not json"),
      raw(None, r#"{"name": "Quiz", "value": 2}"#),
      raw(Some("application/json"), r#"{"name": "Quiz", "value": null}"#),
    ] {
      let resp = app.clone().oneshot(req).await.unwrap();
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
      let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
      let body: Value = serde_json::from_slice(&bytes).unwrap();
      assert!(body["error"].is_string(), "{body}");
    }

    let (_, weights) = send(&app, "GET", "/api/weights", Some(token.as_str()), None).await;
    assert_eq!(weights.as_array().unwrap().len(), 3);
  }

  // ── Grades & overview ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn grade_value_boundaries() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;
    let t     = Some(token.as_str());

    for (value, expected) in [
      (json!(0.99), StatusCode::BAD_REQUEST),
      (json!(6.01), StatusCode::BAD_REQUEST),
      (json!("1"), StatusCode::CREATED),
      (json!(6), StatusCode::CREATED),
    ] {
      let (status, body) = send(
        &app,
        "POST",
        "/api/grades",
        t,
        Some(json!({"subject": "Matematyka", "value": value, "weight_id": "1"})),
      )
      .await;
      assert_eq!(status, expected, "{value}: {body}");
    }

    let (status, body) =
      send(&app, "POST", "/api/grades", t, Some(json!({"value": 5, "weight_id": "1"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "a subject must be selected");
  }

  #[tokio::test]
  async fn overview_tracks_weights_and_grouping() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;
    let t     = Some(token.as_str());

    for (subject, value, weight) in [("Matematyka", 4, "1"), ("Polski", 6, "2"), ("Matematyka", 2, "1")] {
      let (status, _) = send(
        &app,
        "POST",
        "/api/grades",
        t,
        Some(json!({"subject": subject, "value": value, "weight_id": weight})),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (_, groups) = send(&app, "GET", "/api/grades/by-subject", t, None).await;
    let names: Vec<_> = groups
      .as_array()
      .unwrap()
      .iter()
      .map(|g| g["subject"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["Matematyka", "Polski"]);
    assert_eq!(groups[0]["grades"].as_array().unwrap().len(), 2);

    // (4·1 + 6·3 + 2·1) / (1 + 3 + 1) = 4.8
    let (status, overview) = send(&app, "GET", "/api/overview", t, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["average"].as_f64(), Some(4.8));
    assert_eq!(overview["grade_count"], 3);
    assert_eq!(overview["subjects"][0]["average"].as_f64(), Some(3.0));

    // Deleting the "Sprawdzian" weight leaves the Polish grade dangling.
    send(&app, "DELETE", "/api/weights/2", t, None).await;
    let (_, overview) = send(&app, "GET", "/api/overview", t, None).await;
    assert_eq!(overview["average"].as_f64(), Some(3.0));
    assert_eq!(overview["subjects"][1]["average"].as_f64(), Some(0.0));
    assert_eq!(overview["subjects"][1]["grades"][0]["weight_name"], Value::Null);
  }

  #[tokio::test]
  async fn predicted_grades_and_deletion() {
    let app   = app().await;
    let token = register(&app, "ala@example.com").await;
    let t     = Some(token.as_str());

    send(
      &app,
      "POST",
      "/api/grades",
      t,
      Some(json!({"subject": "Historia", "value": 5, "weight_id": "1"})),
    )
    .await;
    let (_, grades) = send(
      &app,
      "POST",
      "/api/grades",
      t,
      Some(json!({"subject": "Historia", "value": 1, "weight_id": "1", "is_predicted": true})),
    )
    .await;
    assert_eq!(grades[1]["is_predicted"], true);

    let (_, overview) = send(&app, "GET", "/api/overview", t, None).await;
    assert_eq!(overview["average"].as_f64(), Some(3.0));
    assert_eq!(overview["actual_average"].as_f64(), Some(5.0));

    let predicted_id = grades[1]["id"].as_str().unwrap();
    let (status, grades) =
      send(&app, "DELETE", &format!("/api/grades/{predicted_id}"), t, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grades.as_array().unwrap().len(), 1);

    // Removing the subject keeps its grades.
    send(&app, "DELETE", "/api/subjects/4", t, None).await;
    let (_, grades) = send(&app, "GET", "/api/grades", t, None).await;
    assert_eq!(grades[0]["subject"], "Historia");
  }
}
