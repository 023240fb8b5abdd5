//! Postal-code (CEP) to address resolution.
//!
//! [`PostalLookup`] is the seam the API depends on; [`ViaCepClient`] is the
//! HTTP implementation talking to a ViaCEP-compatible service.

pub mod client;
pub mod error;
pub mod lookup;

pub use client::ViaCepClient;
pub use error::{LookupError, Result};
pub use lookup::{PostalAddress, PostalLookup};
