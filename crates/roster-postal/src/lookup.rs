//! The lookup abstraction and its result type.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// An address resolved from a postal code. Fields the upstream leaves blank
/// are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
  /// Formatted as `XXXXX-XXX`.
  pub postal_code: String,
  pub street:      String,
  pub complement:  String,
  pub district:    String,
  pub city:        String,
  pub state_name:  String,
  pub state_code:  String,
}

/// Resolves postal codes to addresses.
pub trait PostalLookup: Send + Sync {
  /// Look up `code`, which may contain punctuation. Implementations reject
  /// anything that does not strip to eight digits with
  /// [`LookupError::MalformedInput`] before doing any I/O.
  fn lookup<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<PostalAddress, LookupError>> + Send + 'a;
}
