//! Pet repository and its persistence synchronization.
//!
//! # Responsibility
//! - Own the canonical in-memory pet list for a running session.
//! - Mirror every accepted mutation to the key-value store as one snapshot.
//!
//! # Invariants
//! - Every pet has a non-empty id, unique within the registry.
//! - No two pets share a name ignoring case (for pets added or updated
//!   through the registry).
//! - Storage failures are logged and never roll back in-memory state.

pub mod pet_repo;
pub mod snapshot;
mod writer;
