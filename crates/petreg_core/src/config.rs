//! Registry configuration.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the pet snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "@pets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid registry config: {}", self.0)
    }
}

impl Error for ConfigError {}

/// Settings for one `PetRegistry` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    storage_key: String,
}

impl RegistryConfig {
    /// Uses a custom storage key; blank keys are rejected.
    pub fn with_storage_key(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError("storage key cannot be empty".to_string()));
        }
        Ok(Self { storage_key: key })
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistryConfig, DEFAULT_STORAGE_KEY};

    #[test]
    fn default_uses_pets_key() {
        assert_eq!(RegistryConfig::default().storage_key(), DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        assert!(RegistryConfig::with_storage_key(" ").is_err());
        assert_eq!(
            RegistryConfig::with_storage_key("@pets-test")
                .expect("non-empty key")
                .storage_key(),
            "@pets-test"
        );
    }
}
