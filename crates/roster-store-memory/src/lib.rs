//! In-memory backend for the Roster person store.
//!
//! Records live for the lifetime of the process. A single async mutex
//! serialises every operation, so no caller ever observes a half-applied
//! mutation.

mod store;

pub use store::MemoryStore;

#[cfg(test)]
mod tests;
