//! Handlers for `/people` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/people` | `?search=&page=&limit=` |
//! | `POST`   | `/people` | Body: full [`PersonForm`]; 422 / 409 / 201 |
//! | `GET`    | `/people/:id` | 404 if not found |
//! | `PATCH`  | `/people/:id` | Body: any subset of the form fields |
//! | `DELETE` | `/people/:id` | 204, 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  person::{AddressPatch, NewAddress, NewPerson, Person, PersonId, PersonPatch},
  store::{ListQuery, Page, PersonStore},
};
use roster_forms::{Field, FieldError, PersonForm, ValidationErrors, validate_field};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, QueryParams},
};

fn not_found(id: &PersonId) -> ApiError {
  ApiError::NotFound(format!("person {id} not found"))
}

/// Reject `email` / `national_id` values already held by a record other
/// than `exclude`. Only supplied values are checked.
///
/// The check and the following write are separate store operations, so two
/// concurrent requests can still both pass.
async fn ensure_unique<S: PersonStore>(
  store: &S,
  email: Option<&str>,
  national_id: Option<&str>,
  exclude: Option<&PersonId>,
) -> Result<(), ApiError> {
  if let Some(email) = email {
    if store
      .is_email_in_use(email, exclude)
      .await
      .map_err(ApiError::store)?
    {
      tracing::warn!(%email, "rejected duplicate email");
      return Err(ApiError::Conflict("email already in use".into()));
    }
  }
  if let Some(national_id) = national_id {
    if store
      .is_national_id_in_use(national_id, exclude)
      .await
      .map_err(ApiError::store)?
    {
      tracing::warn!(%national_id, "rejected duplicate national id");
      return Err(ApiError::Conflict("national id already in use".into()));
    }
  }
  Ok(())
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /people[?search=<text>][&page=<n>][&limit=<n>]`
pub async fn list<S: PersonStore>(
  State(store): State<Arc<S>>,
  QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Page<Person>>, ApiError> {
  let page = store.list(&query).await.map_err(ApiError::store)?;
  Ok(Json(page))
}

// ─── Create ──────────────────────────────────────────────────────────────────

fn new_person(form: PersonForm) -> NewPerson {
  NewPerson {
    name:        form.name,
    email:       form.email,
    phone:       form.phone,
    national_id: form.national_id,
    birth_date:  form.birth_date,
    address:     NewAddress {
      postal_code: form.postal_code,
      number:      form.number,
      street:      Some(form.street),
      complement:  (!form.complement.is_empty()).then_some(form.complement),
      district:    Some(form.district),
      city:        Some(form.city),
      state_name:  Some(form.state_name),
      state_code:  Some(form.state_code),
    },
  }
}

/// `POST /people`
pub async fn create<S: PersonStore>(
  State(store): State<Arc<S>>,
  JsonBody(form): JsonBody<PersonForm>,
) -> Result<impl IntoResponse, ApiError> {
  let form = form.normalized();
  form.validate()?;
  ensure_unique(&*store, Some(&form.email), Some(&form.national_id), None).await?;

  let person = store
    .create(new_person(form))
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /people/:id`
pub async fn get_one<S: PersonStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
) -> Result<Json<Person>, ApiError> {
  let person = store
    .get(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(&id))?;
  Ok(Json(person))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Body of `PATCH /people/:id`: the form with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFormPatch {
  pub name:        Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  pub national_id: Option<String>,
  pub birth_date:  Option<String>,
  pub postal_code: Option<String>,
  pub street:      Option<String>,
  pub number:      Option<String>,
  pub complement:  Option<String>,
  pub district:    Option<String>,
  pub city:        Option<String>,
  pub state_name:  Option<String>,
  pub state_code:  Option<String>,
}

impl PersonFormPatch {
  fn value(&self, field: Field) -> Option<&str> {
    let v = match field {
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
    };
    v.as_deref()
  }

  pub fn normalized(mut self) -> Self {
    self.state_code = self.state_code.map(|s| s.to_uppercase());
    self
  }

  /// Validate the supplied fields only.
  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = Field::ALL
      .into_iter()
      .filter_map(|f| self.value(f).and_then(|v| validate_field(f, v).err()))
      .collect();

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ValidationErrors(errors))
    }
  }

  pub fn into_patch(self, id: PersonId) -> PersonPatch {
    let address = AddressPatch {
      postal_code: self.postal_code,
      street:      self.street,
      number:      self.number,
      complement:  self.complement,
      district:    self.district,
      city:        self.city,
      state_name:  self.state_name,
      state_code:  self.state_code,
    };

    PersonPatch {
      id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      national_id: self.national_id,
      birth_date: self.birth_date,
      address: (!address.is_empty()).then_some(address),
    }
  }
}

/// `PATCH /people/:id`
pub async fn update<S: PersonStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
  JsonBody(body): JsonBody<PersonFormPatch>,
) -> Result<Json<Person>, ApiError> {
  let body = body.normalized();
  body.validate()?;

  if store.get(&id).await.map_err(ApiError::store)?.is_none() {
    return Err(not_found(&id));
  }
  ensure_unique(
    &*store,
    body.email.as_deref(),
    body.national_id.as_deref(),
    Some(&id),
  )
  .await?;

  let person = store
    .update(body.into_patch(id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(person))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /people/:id`
pub async fn delete<S: PersonStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
) -> Result<StatusCode, ApiError> {
  store.delete(&id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
