//! Person records and the storage abstraction behind the Roster registry.
//!
//! No HTTP, no I/O: backends implement [`store::PersonStore`] and the API
//! layer is written against that trait alone.

pub mod error;
pub mod person;
pub mod store;

pub use error::{Error, Result};
