//! Pet filtering and name search.
//!
//! # Responsibility
//! - Compute visible subsets of a pet list from name, age and description
//!   criteria.
//!
//! # Invariants
//! - Evaluation is pure: no mutation, no I/O, same input gives same output.
//! - Results preserve input order and never duplicate records.

pub mod filter;
