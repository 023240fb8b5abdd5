//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`PersonStore`] and any
//! [`PostalLookup`]. Transport, logging layers and configuration are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone(), postal.clone()))
//! ```

pub mod checks;
pub mod error;
pub mod extract;
pub mod people;
pub mod postal_codes;
pub mod stats;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::store::PersonStore;
use roster_postal::PostalLookup;

pub use error::ApiError;

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, L>(store: Arc<S>, postal: Arc<L>) -> Router<()>
where
  S: PersonStore + 'static,
  L: PostalLookup + 'static,
{
  let people = Router::new()
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .patch(people::update::<S>)
        .delete(people::delete::<S>),
    )
    // Duplicate checks
    .route("/people/checks/email", get(checks::email::<S>))
    .route("/people/checks/national-id", get(checks::national_id::<S>))
    .route("/stats", get(stats::handler::<S>))
    .with_state(store);

  let lookups = Router::new()
    .route("/postal-codes/{code}", get(postal_codes::lookup::<L>))
    .with_state(postal);

  people.merge(lookups)
}
