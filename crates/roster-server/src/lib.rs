//! Roster HTTP server: configuration, sample data and router assembly.

pub mod seed;
pub mod settings;

pub use settings::ServerConfig;

use std::sync::Arc;

use axum::Router;
use roster_core::store::PersonStore;
use roster_postal::PostalLookup;
use tower_http::trace::TraceLayer;

/// The full application: the JSON API under `/api`, with request tracing.
pub fn app<S, L>(store: Arc<S>, postal: Arc<L>) -> Router
where
  S: PersonStore + 'static,
  L: PostalLookup + 'static,
{
  Router::new()
    .nest("/api", roster_api::api_router(store, postal))
    .layer(TraceLayer::new_for_http())
}
