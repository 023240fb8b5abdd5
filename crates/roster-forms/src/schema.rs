//! Declarative rules for the person registration form.
//!
//! | Field | Rule |
//! |-------|------|
//! | `name` | required, 2–100 chars |
//! | `email` | required, [`validate_email`] |
//! | `phone` | required, `(XX) XXXXX-XXXX` or `(XX) XXXX-XXXX` |
//! | `nationalId` | required, `XXX.XXX.XXX-XX` and valid check digits |
//! | `birthDate` | required, `YYYY-MM-DD` |
//! | `postalCode` | required, `XXXXX-XXX` |
//! | `street` | required, ≥ 5 chars |
//! | `district`, `city`, `stateName` | required, ≥ 2 chars |
//! | `number` | required |
//! | `complement` | optional, ≤ 100 chars |
//! | `stateCode` | required, exactly 2 upper-case chars |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  error::{FieldError, FieldErrorKind, ValidationErrors},
  national_id::validate_national_id,
  text::validate_email,
};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// A field of [`PersonForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
  Name,
  Email,
  Phone,
  NationalId,
  BirthDate,
  PostalCode,
  Street,
  Number,
  Complement,
  District,
  City,
  StateName,
  StateCode,
}

impl Field {
  /// Every field, in form order.
  pub const ALL: [Field; 13] = [
    Field::Name,
    Field::Email,
    Field::Phone,
    Field::NationalId,
    Field::BirthDate,
    Field::PostalCode,
    Field::Street,
    Field::Number,
    Field::Complement,
    Field::District,
    Field::City,
    Field::StateName,
    Field::StateCode,
  ];

  /// The camelCase name used on the wire.
  pub fn as_str(self) -> &'static str {
    match self {
      Field::Name => "name",
      Field::Email => "email",
      Field::Phone => "phone",
      Field::NationalId => "nationalId",
      Field::BirthDate => "birthDate",
      Field::PostalCode => "postalCode",
      Field::Street => "street",
      Field::Number => "number",
      Field::Complement => "complement",
      Field::District => "district",
      Field::City => "city",
      Field::StateName => "stateName",
      Field::StateCode => "stateCode",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Shape matching ──────────────────────────────────────────────────────────

/// Match `value` against a mask where `9` stands for one ASCII digit, a space
/// stands for one whitespace character, and anything else must match
/// literally.
fn matches_mask(value: &str, mask: &str) -> bool {
  value.chars().count() == mask.chars().count()
    && value.chars().zip(mask.chars()).all(|(v, m)| match m {
      '9' => v.is_ascii_digit(),
      ' ' => v.is_whitespace(),
      _ => v == m,
    })
}

const PHONE_MASKS: [&str; 2] = ["(99) 99999-9999", "(99) 9999-9999"];
const NATIONAL_ID_MASK: &str = "999.999.999-99";
const DATE_MASK: &str = "9999-99-99";
const POSTAL_CODE_MASK: &str = "99999-999";

// ─── Rules ───────────────────────────────────────────────────────────────────

fn min_chars(value: &str, min: usize) -> Result<(), FieldErrorKind> {
  if value.chars().count() < min {
    Err(FieldErrorKind::TooShort { min })
  } else {
    Ok(())
  }
}

fn max_chars(value: &str, max: usize) -> Result<(), FieldErrorKind> {
  if value.chars().count() > max {
    Err(FieldErrorKind::TooLong { max })
  } else {
    Ok(())
  }
}

fn format_if(ok: bool) -> Result<(), FieldErrorKind> {
  if ok { Ok(()) } else { Err(FieldErrorKind::Format) }
}

fn check(field: Field, value: &str) -> Result<(), FieldErrorKind> {
  if value.is_empty() {
    return match field {
      Field::Complement => Ok(()),
      _ => Err(FieldErrorKind::Required),
    };
  }

  match field {
    Field::Name => {
      min_chars(value, 2)?;
      max_chars(value, 100)
    }
    Field::Email => format_if(validate_email(value)),
    Field::Phone => format_if(PHONE_MASKS.iter().any(|m| matches_mask(value, m))),
    Field::NationalId => {
      format_if(matches_mask(value, NATIONAL_ID_MASK))?;
      if validate_national_id(value) {
        Ok(())
      } else {
        Err(FieldErrorKind::Checksum)
      }
    }
    Field::BirthDate => format_if(matches_mask(value, DATE_MASK)),
    Field::PostalCode => format_if(matches_mask(value, POSTAL_CODE_MASK)),
    Field::Street => min_chars(value, 5),
    Field::Number => Ok(()),
    Field::Complement => max_chars(value, 100),
    Field::District | Field::City | Field::StateName => min_chars(value, 2),
    Field::StateCode => {
      if value.chars().count() != 2 {
        return Err(FieldErrorKind::WrongLength { expected: 2 });
      }
      format_if(!value.chars().any(char::is_lowercase))
    }
  }
}

/// Apply the rule for `field` to a single value.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
  check(field, value).map_err(|kind| FieldError::new(field, kind))
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// The flat registration form as submitted by a client. Missing fields
/// deserialise as empty strings so that they surface as `Required` errors
/// rather than decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonForm {
  pub name:        String,
  pub email:       String,
  pub phone:       String,
  pub national_id: String,
  pub birth_date:  String,
  pub postal_code: String,
  pub street:      String,
  pub number:      String,
  pub complement:  String,
  pub district:    String,
  pub city:        String,
  pub state_name:  String,
  pub state_code:  String,
}

impl PersonForm {
  pub fn value(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Email => &self.email,
      Field::Phone => &self.phone,
      Field::NationalId => &self.national_id,
      Field::BirthDate => &self.birth_date,
      Field::PostalCode => &self.postal_code,
      Field::Street => &self.street,
      Field::Number => &self.number,
      Field::Complement => &self.complement,
      Field::District => &self.district,
      Field::City => &self.city,
      Field::StateName => &self.state_name,
      Field::StateCode => &self.state_code,
    }
  }

  /// Apply the form's forced transformations (upper-case state code).
  pub fn normalized(mut self) -> Self {
    self.state_code = self.state_code.to_uppercase();
    self
  }

  /// Check every field, collecting all failures.
  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = Field::ALL
      .into_iter()
      .filter_map(|f| validate_field(f, self.value(f)).err())
      .collect();

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ValidationErrors(errors))
    }
  }
}
