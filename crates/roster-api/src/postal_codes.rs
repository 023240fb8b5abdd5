//! Handler for `GET /postal-codes/:code`.
//!
//! Lookup failures map to statuses in [`crate::error`]: malformed input is a
//! 400, an unknown code a 404, and upstream trouble a 502/503/504.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use roster_postal::{PostalAddress, PostalLookup};

use crate::error::ApiError;

pub async fn lookup<L: PostalLookup>(
  State(postal): State<Arc<L>>,
  Path(code): Path<String>,
) -> Result<Json<PostalAddress>, ApiError> {
  let address = postal.lookup(&code).await?;
  Ok(Json(address))
}
