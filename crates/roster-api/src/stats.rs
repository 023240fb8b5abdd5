//! Handler for `GET /stats`.

use std::sync::Arc;

use axum::{Json, extract::State};
use roster_core::store::{PersonStore, Stats};

use crate::error::ApiError;

pub async fn handler<S: PersonStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Stats>, ApiError> {
  let stats = store.stats().await.map_err(ApiError::store)?;
  Ok(Json(stats))
}
