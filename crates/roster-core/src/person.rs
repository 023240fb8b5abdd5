//! Person records and the input shapes used to create and update them.
//!
//! Phone numbers and national ids are stored exactly as submitted (normally
//! in their formatted form); normalisation is the caller's job.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque identifier assigned by the store at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for PersonId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for PersonId {
  fn from(s: String) -> Self { Self(s) }
}

// ─── Address ─────────────────────────────────────────────────────────────────

/// An empty complement is stored as `None`.
fn non_empty(v: String) -> Option<String> { (!v.is_empty()).then_some(v) }

/// A postal address embedded in a [`Person`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  /// `XXXXX-XXX` once validated.
  pub postal_code: String,
  pub street:      String,
  pub number:      String,
  pub complement:  Option<String>,
  pub district:    String,
  pub city:        String,
  /// Full state name, e.g. "São Paulo".
  pub state_name:  String,
  /// Two-letter state code, e.g. "SP".
  pub state_code:  String,
}

impl Address {
  /// Overwrite every sub-field supplied in `patch`; the rest keep their
  /// current values.
  pub fn merge(&mut self, patch: AddressPatch) {
    let AddressPatch {
      postal_code,
      street,
      number,
      complement,
      district,
      city,
      state_name,
      state_code,
    } = patch;

    if let Some(v) = postal_code {
      self.postal_code = v;
    }
    if let Some(v) = street {
      self.street = v;
    }
    if let Some(v) = number {
      self.number = v;
    }
    if let Some(v) = complement {
      self.complement = non_empty(v);
    }
    if let Some(v) = district {
      self.district = v;
    }
    if let Some(v) = city {
      self.city = v;
    }
    if let Some(v) = state_name {
      self.state_name = v;
    }
    if let Some(v) = state_code {
      self.state_code = v;
    }
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// One registered individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:          PersonId,
  pub name:        String,
  pub email:       String,
  pub phone:       String,
  pub national_id: String,
  /// `YYYY-MM-DD`.
  pub birth_date:  String,
  pub address:     Address,
  /// Set once by the store.
  pub created_at:  DateTime<Utc>,
  /// Refreshed by the store on every successful update.
  pub updated_at:  DateTime<Utc>,
}

impl Person {
  /// Apply the scalar and address fields of `patch`. The `id` and
  /// timestamps are left alone; the store owns those.
  pub fn merge(&mut self, patch: PersonPatch) {
    let PersonPatch {
      id: _,
      name,
      email,
      phone,
      national_id,
      birth_date,
      address,
    } = patch;

    if let Some(v) = name {
      self.name = v;
    }
    if let Some(v) = email {
      self.email = v;
    }
    if let Some(v) = phone {
      self.phone = v;
    }
    if let Some(v) = national_id {
      self.national_id = v;
    }
    if let Some(v) = birth_date {
      self.birth_date = v;
    }
    if let Some(a) = address {
      self.address.merge(a);
    }
  }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Address part of [`NewPerson`]. Only the postal code and number are
/// mandatory; the remaining fields are usually filled by a postal-code
/// lookup and default to empty strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
  pub postal_code: String,
  pub number:      String,
  #[serde(default)]
  pub street:      Option<String>,
  #[serde(default)]
  pub complement:  Option<String>,
  #[serde(default)]
  pub district:    Option<String>,
  #[serde(default)]
  pub city:        Option<String>,
  #[serde(default)]
  pub state_name:  Option<String>,
  #[serde(default)]
  pub state_code:  Option<String>,
}

impl From<NewAddress> for Address {
  fn from(a: NewAddress) -> Self {
    Address {
      postal_code: a.postal_code,
      street:      a.street.unwrap_or_default(),
      number:      a.number,
      complement:  a.complement.and_then(non_empty),
      district:    a.district.unwrap_or_default(),
      city:        a.city.unwrap_or_default(),
      state_name:  a.state_name.unwrap_or_default(),
      state_code:  a.state_code.unwrap_or_default(),
    }
  }
}

/// Input to [`crate::store::PersonStore::create`].
/// `id`, `created_at` and `updated_at` are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
  pub name:        String,
  pub email:       String,
  pub phone:       String,
  pub national_id: String,
  pub birth_date:  String,
  pub address:     NewAddress,
}

/// Partial address update; `None` means "keep the current value". An empty
/// `complement` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
  pub postal_code: Option<String>,
  pub street:      Option<String>,
  pub number:      Option<String>,
  pub complement:  Option<String>,
  pub district:    Option<String>,
  pub city:        Option<String>,
  pub state_name:  Option<String>,
  pub state_code:  Option<String>,
}

impl AddressPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

/// Input to [`crate::store::PersonStore::update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPatch {
  pub id:          PersonId,
  pub name:        Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  pub national_id: Option<String>,
  pub birth_date:  Option<String>,
  pub address:     Option<AddressPatch>,
}

impl PersonPatch {
  /// A patch that changes nothing but `updated_at`.
  pub fn new(id: PersonId) -> Self {
    Self {
      id,
      name: None,
      email: None,
      phone: None,
      national_id: None,
      birth_date: None,
      address: None,
    }
  }
}
