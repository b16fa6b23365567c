//! Core domain logic for the pet registry.
//! This crate is the single source of truth for pet invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{ConfigError, RegistryConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::pet::{Pet, PetDraft, PetId, PetValidationError, MAX_DESCRIPTION_CHARS};
pub use notify::{
    AlertQueue, LogNotifier, Notifier, DUPLICATE_PET_MESSAGE, DUPLICATE_PET_UPDATE_MESSAGE,
};
pub use repo::pet_repo::{LoadOutcome, PetRegistry, RegistryError, RegistryResult};
pub use repo::snapshot::{decode_snapshot, encode_snapshot, DecodedSnapshot, SnapshotError};
pub use search::filter::{evaluate, search_by_name, AgeRange, PetFilter};
pub use service::pet_service::{parse_age, PetForm, PetService, ServiceError, ServiceResult};
pub use store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
