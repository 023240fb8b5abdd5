//! Handlers for `/people/checks/*`, used by clients to flag duplicates while
//! the form is being filled in.

use std::sync::Arc;

use axum::{Json, extract::State};
use roster_core::{person::PersonId, store::PersonStore};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::QueryParams};

#[derive(Debug, Deserialize)]
pub struct CheckParams {
  pub value:   String,
  /// The record being edited, which never counts as a duplicate of itself.
  pub exclude: Option<PersonId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
  pub in_use: bool,
}

/// `GET /people/checks/email?value=<email>[&exclude=<id>]`
pub async fn email<S: PersonStore>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<CheckParams>,
) -> Result<Json<CheckResult>, ApiError> {
  let in_use = store
    .is_email_in_use(&params.value, params.exclude.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(CheckResult { in_use }))
}

/// `GET /people/checks/national-id?value=<id>[&exclude=<id>]`
pub async fn national_id<S: PersonStore>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<CheckParams>,
) -> Result<Json<CheckResult>, ApiError> {
  let in_use = store
    .is_national_id_in_use(&params.value, params.exclude.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(CheckResult { in_use }))
}
