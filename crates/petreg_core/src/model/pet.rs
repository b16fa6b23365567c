//! Pet record, identity and input validation.
//!
//! # Responsibility
//! - Define `Pet` (stored shape) and `PetDraft` (input to `add`).
//! - Own identifier generation and boundary validation rules.
//!
//! # Invariants
//! - `PetId` is never empty once constructed.
//! - `photo` is an opaque reference; its target is owned elsewhere.
//! - Wire field names are exactly `id`, `name`, `age`, `description`, `photo`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Maximum accepted description length, counted in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Stable identifier of a pet record.
///
/// Fresh ids are UUID v4 strings. Ids loaded from older snapshots are kept
/// verbatim, whatever their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(String);

impl PetId {
    /// Generates a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, rejecting empty or blank input.
    pub fn parse(value: impl Into<String>) -> Result<Self, PetValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PetValidationError::EmptyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PetId {
    type Err = PetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Boundary validation failures for pet input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    EmptyId,
    /// Name is missing or blank.
    NameRequired,
    /// Age text is not numeric.
    AgeNotNumber(String),
    /// Age is numeric but has a fractional part.
    AgeNotInteger(String),
    /// Age is zero or negative.
    AgeNotPositive,
    DescriptionTooLong {
        chars: usize,
        max: usize,
    },
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "pet id cannot be empty"),
            Self::NameRequired => write!(f, "Pet name is required"),
            Self::AgeNotNumber(value) => write!(f, "Age must be a number (got `{value}`)"),
            Self::AgeNotInteger(value) => write!(f, "Age must be an integer (got `{value}`)"),
            Self::AgeNotPositive => write!(f, "Age must be positive"),
            Self::DescriptionTooLong { chars, max } => write!(
                f,
                "Description cannot exceed {max} characters (got {chars})"
            ),
        }
    }
}

impl Error for PetValidationError {}

/// Canonical stored pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    /// Whole years; expected to be >= 1.
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque URI of an externally owned image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Pet {
    /// Creates a pet with a freshly generated id and no optional fields.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self::with_id(PetId::generate(), name, age)
    }

    /// Creates a pet with a caller-provided id.
    pub fn with_id(id: PetId, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            description: None,
            photo: None,
        }
    }

    /// Returns whether the pet carries a non-empty description.
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|description| !description.is_empty())
    }

    /// Case-insensitive name equality used for duplicate detection.
    pub fn name_collides_with(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Checks boundary rules that the registry itself does not enforce.
    pub fn validate(&self) -> Result<(), PetValidationError> {
        validate_fields(&self.name, self.age, self.description.as_deref())
    }
}

/// Input to `PetRegistry::add`: a pet whose identity may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PetDraft {
    /// Pre-assigned id; a fresh one is generated when `None`.
    pub id: Option<PetId>,
    pub name: String,
    pub age: u32,
    pub description: Option<String>,
    pub photo: Option<String>,
}

impl PetDraft {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn id(mut self, id: PetId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn validate(&self) -> Result<(), PetValidationError> {
        validate_fields(&self.name, self.age, self.description.as_deref())
    }

    /// Materializes the draft, generating an id when none was supplied.
    pub fn into_pet(self) -> Pet {
        Pet {
            id: self.id.unwrap_or_else(PetId::generate),
            name: self.name,
            age: self.age,
            description: self.description,
            photo: self.photo,
        }
    }
}

impl From<Pet> for PetDraft {
    fn from(pet: Pet) -> Self {
        Self {
            id: Some(pet.id),
            name: pet.name,
            age: pet.age,
            description: pet.description,
            photo: pet.photo,
        }
    }
}

fn validate_fields(
    name: &str,
    age: u32,
    description: Option<&str>,
) -> Result<(), PetValidationError> {
    if name.trim().is_empty() {
        return Err(PetValidationError::NameRequired);
    }
    if age == 0 {
        return Err(PetValidationError::AgeNotPositive);
    }
    if let Some(description) = description {
        let chars = description.chars().count();
        if chars > MAX_DESCRIPTION_CHARS {
            return Err(PetValidationError::DescriptionTooLong {
                chars,
                max: MAX_DESCRIPTION_CHARS,
            });
        }
    }
    Ok(())
}
