use thiserror::Error;

/// Why a postal-code lookup produced no address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
  /// The input does not contain exactly eight digits. No request was made.
  #[error("postal code must have exactly 8 digits")]
  MalformedInput,

  #[error("postal code not found")]
  NotFound,

  #[error("postal code lookup timed out")]
  Timeout,

  #[error("postal code service is unreachable")]
  Offline,

  #[error("postal code service returned status {0}")]
  Status(u16),

  #[error("postal code lookup failed: {0}")]
  Transport(String),
}

pub type Result<T, E = LookupError> = std::result::Result<T, E>;
