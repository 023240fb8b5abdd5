//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::store::StoreError;
use roster_forms::ValidationErrors;
use roster_postal::LookupError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// The request body or query string could not be decoded.
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  /// Another record already holds a value that must be unique.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error(transparent)]
  Lookup(#[from] LookupError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a backend failure, surfacing missing records as [`ApiError::NotFound`].
  pub fn store<E: StoreError>(err: E) -> Self {
    if err.is_not_found() {
      ApiError::NotFound(err.to_string())
    } else {
      ApiError::Store(Box::new(err))
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

fn lookup_status(err: &LookupError) -> StatusCode {
  match err {
    LookupError::MalformedInput => StatusCode::BAD_REQUEST,
    LookupError::NotFound => StatusCode::NOT_FOUND,
    LookupError::Timeout => StatusCode::GATEWAY_TIMEOUT,
    LookupError::Offline => StatusCode::SERVICE_UNAVAILABLE,
    LookupError::Status(_) | LookupError::Transport(_) => StatusCode::BAD_GATEWAY,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    match self {
      ApiError::NotFound(_) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
      }
      ApiError::BadRequest(_) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
      }
      ApiError::Validation(errors) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message, "fields": errors })),
      )
        .into_response(),
      ApiError::Conflict(_) => {
        (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
      }
      ApiError::Lookup(e) => {
        (lookup_status(&e), Json(json!({ "error": message }))).into_response()
      }
      ApiError::Store(_) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
      )
        .into_response(),
    }
  }
}
