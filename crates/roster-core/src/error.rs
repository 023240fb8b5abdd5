//! Error types for `roster-core`.

use thiserror::Error;

use crate::person::PersonId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  NotFound(PersonId),
}

impl crate::store::StoreError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Error::NotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
