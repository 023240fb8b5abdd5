//! Validation failures reported per field.

use serde::Serialize;
use thiserror::Error;

use crate::schema::Field;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldErrorKind {
  #[error("is required")]
  Required,

  #[error("must have at least {min} characters")]
  TooShort { min: usize },

  #[error("must have at most {max} characters")]
  TooLong { max: usize },

  #[error("must have exactly {expected} characters")]
  WrongLength { expected: usize },

  #[error("has an invalid format")]
  Format,

  #[error("has invalid check digits")]
  Checksum,
}

/// A rejected field. Always recoverable by correcting the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("{field} {kind}")]
pub struct FieldError {
  pub field: Field,
  #[serde(flatten)]
  pub kind:  FieldErrorKind,
}

impl FieldError {
  pub fn new(field: Field, kind: FieldErrorKind) -> Self { Self { field, kind } }
}

/// Every field that failed validation, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} field(s) failed validation", .0.len())]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
  /// The failure recorded for `field`, if any.
  pub fn get(&self, field: Field) -> Option<FieldErrorKind> {
    self.0.iter().find(|e| e.field == field).map(|e| e.kind)
  }
}
