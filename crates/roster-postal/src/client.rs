//! A reqwest-backed [`PostalLookup`].

use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use roster_forms::{format_postal_code, is_valid_postal_code, strip_non_digits};
use serde::Deserialize;
use serde_json::Value;

use crate::{
  error::{LookupError, Result},
  lookup::{PostalAddress, PostalLookup},
};

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ViaCepBody {
  cep:         String,
  logradouro:  String,
  complemento: String,
  bairro:      String,
  localidade:  String,
  uf:          String,
  estado:      String,
  /// Present on unknown codes, as `true` or `"true"` depending on version.
  erro:        Option<Value>,
}

impl ViaCepBody {
  fn is_not_found(&self) -> bool {
    match &self.erro {
      Some(Value::Bool(flag)) => *flag,
      Some(Value::String(flag)) => flag == "true",
      _ => false,
    }
  }

  fn into_address(self, digits: &str) -> PostalAddress {
    let postal_code = if self.cep.is_empty() {
      format_postal_code(digits)
    } else {
      format_postal_code(&self.cep)
    };
    let state_name = if self.estado.is_empty() {
      self.localidade.clone()
    } else {
      self.estado
    };

    PostalAddress {
      postal_code,
      street: self.logradouro,
      complement: self.complemento,
      district: self.bairro,
      city: self.localidade,
      state_name,
      state_code: self.uf,
    }
  }
}

fn classify(err: reqwest::Error) -> LookupError {
  if err.is_timeout() {
    LookupError::Timeout
  } else if err.is_connect() {
    LookupError::Offline
  } else {
    LookupError::Transport(err.to_string())
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Looks up postal codes at `{base_url}/{digits}/json/`.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
  client:   Client,
  base_url: String,
}

impl ViaCepClient {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| LookupError::Transport(e.to_string()))?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, digits: &str) -> String {
    format!("{}/{digits}/json/", self.base_url.trim_end_matches('/'))
  }
}

impl PostalLookup for ViaCepClient {
  async fn lookup(&self, code: &str) -> Result<PostalAddress> {
    if !is_valid_postal_code(code) {
      return Err(LookupError::MalformedInput);
    }
    let digits = strip_non_digits(code);

    let url = self.url(&digits);
    tracing::debug!(%url, "looking up postal code");

    let resp = self
      .client
      .get(&url)
      .header(header::ACCEPT, "application/json")
      .send()
      .await
      .map_err(|e| {
        tracing::warn!(postal_code = %digits, error = %e, "postal code request failed");
        classify(e)
      })?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
      return Err(LookupError::NotFound);
    }
    if !status.is_success() {
      tracing::warn!(postal_code = %digits, %status, "postal code service error");
      return Err(LookupError::Status(status.as_u16()));
    }

    let body: ViaCepBody = resp.json().await.map_err(classify)?;
    if body.is_not_found() {
      return Err(LookupError::NotFound);
    }
    Ok(body.into_address(&digits))
  }
}
