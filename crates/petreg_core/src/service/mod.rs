//! Use-case services.
//!
//! # Responsibility
//! - Validate raw user input before it reaches the registry.
//! - Keep UI and CLI callers decoupled from storage details.

pub mod pet_service;
