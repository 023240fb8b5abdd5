//! Formatting, parsing and validation of user-entered person fields.
//!
//! Everything except [`debounce`] is pure: no state, no I/O, and no function
//! panics on any input. Formatting helpers return their input unchanged when
//! it does not have the expected number of digits.

pub mod debounce;
pub mod error;
pub mod format;
pub mod national_id;
pub mod schema;
pub mod text;

pub use debounce::Debouncer;
pub use error::{FieldError, FieldErrorKind, ValidationErrors};
pub use format::{
  format_date_display, format_national_id, format_phone, format_postal_code,
  is_valid_postal_code, parse_date_display, strip_non_digits,
};
pub use national_id::validate_national_id;
pub use schema::{Field, PersonForm, validate_field};
pub use text::{capitalize_words, truncate_text, validate_email};
