//! Pet domain model.
//!
//! # Responsibility
//! - Define the canonical pet record persisted by the registry.
//! - Provide boundary validation for user-entered pet data.
//!
//! # Invariants
//! - Every stored pet is identified by a non-empty `PetId`.
//! - Validation runs at the input boundary; the registry does not re-check
//!   age or description limits.

pub mod pet;
