//! Pet use-case service.
//!
//! # Responsibility
//! - Turn raw form input into validated drafts.
//! - Provide create/edit/remove/search/filter entry points over one
//!   explicitly owned registry.
//!
//! # Invariants
//! - Nothing reaches the registry without passing form validation.
//! - Edits replace every field of the target record.

use crate::model::pet::{Pet, PetDraft, PetId, PetValidationError};
use crate::repo::pet_repo::{PetRegistry, RegistryError};
use crate::search::filter::PetFilter;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Validation(PetValidationError),
    Registry(RegistryError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<PetValidationError> for ServiceError {
    fn from(value: PetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RegistryError> for ServiceError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Raw pet form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetForm {
    pub name: String,
    /// Age as entered; parsed during validation.
    pub age: String,
    pub description: String,
    pub photo: Option<String>,
}

impl PetForm {
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            ..Self::default()
        }
    }

    /// Validates and normalizes the form into a draft without an id.
    ///
    /// Name is trimmed; blank description and photo become absent.
    pub fn to_draft(&self) -> Result<PetDraft, PetValidationError> {
        let draft = PetDraft {
            id: None,
            name: self.name.trim().to_string(),
            age: parse_age(&self.age)?,
            description: non_blank(&self.description),
            photo: self.photo.as_deref().and_then(non_blank),
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Parses user-entered age text into a positive whole number.
pub fn parse_age(text: &str) -> Result<u32, PetValidationError> {
    let trimmed = text.trim();
    if let Ok(age) = trimmed.parse::<i64>() {
        return match u32::try_from(age) {
            Ok(age) if age > 0 => Ok(age),
            Ok(_) => Err(PetValidationError::AgeNotPositive),
            Err(_) if age < 0 => Err(PetValidationError::AgeNotPositive),
            Err(_) => Err(PetValidationError::AgeNotNumber(trimmed.to_string())),
        };
    }
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_finite() => Err(PetValidationError::AgeNotNumber(trimmed.to_string())),
        Ok(value) if value <= 0.0 => Err(PetValidationError::AgeNotPositive),
        // "3.0" is still a whole number.
        Ok(value) if value.fract() == 0.0 && value <= f64::from(u32::MAX) => Ok(value as u32),
        Ok(_) => Err(PetValidationError::AgeNotInteger(trimmed.to_string())),
        Err(_) => Err(PetValidationError::AgeNotNumber(trimmed.to_string())),
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Use-case facade owning one registry.
pub struct PetService {
    registry: PetRegistry,
}

impl PetService {
    pub fn new(registry: PetRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PetRegistry {
        &self.registry
    }

    /// Validates the form and adds a new pet.
    pub fn create_pet(&mut self, form: &PetForm) -> ServiceResult<PetId> {
        let draft = form.to_draft()?;
        Ok(self.registry.add(draft)?)
    }

    /// Like [`PetService::create_pet`], but keeps a caller-chosen id.
    pub fn create_pet_with_id(&mut self, id: PetId, form: &PetForm) -> ServiceResult<PetId> {
        let draft = form.to_draft()?.id(id);
        Ok(self.registry.add(draft)?)
    }

    /// Validates the form and replaces every field of pet `id`.
    pub fn edit_pet(&mut self, id: &PetId, form: &PetForm) -> ServiceResult<()> {
        let draft = form.to_draft()?;
        let pet = draft.id(id.clone()).into_pet();
        Ok(self.registry.update(pet)?)
    }

    pub fn remove_pet(&mut self, id: &PetId) -> ServiceResult<Pet> {
        Ok(self.registry.delete(id)?)
    }

    pub fn pets(&self) -> &[Pet] {
        self.registry.list()
    }

    pub fn search(&self, query: &str) -> Vec<&Pet> {
        self.registry.search(query)
    }

    /// Pets visible under the given filter criteria.
    pub fn visible_pets(&self, filter: &PetFilter) -> Vec<&Pet> {
        filter.apply(self.registry.list())
    }

    pub async fn flush(&self) {
        self.registry.flush().await;
    }

    pub async fn close(self) {
        self.registry.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_age, PetForm};
    use crate::model::pet::PetValidationError;

    #[test]
    fn parse_age_accepts_positive_integers() {
        assert_eq!(parse_age(" 4 "), Ok(4));
        assert_eq!(parse_age("3.0"), Ok(3));
    }

    #[test]
    fn parse_age_reports_each_failure_kind() {
        assert_eq!(
            parse_age("abc"),
            Err(PetValidationError::AgeNotNumber("abc".to_string()))
        );
        assert_eq!(
            parse_age("2.5"),
            Err(PetValidationError::AgeNotInteger("2.5".to_string()))
        );
        assert_eq!(parse_age("0"), Err(PetValidationError::AgeNotPositive));
        assert_eq!(parse_age("-3"), Err(PetValidationError::AgeNotPositive));
        assert_eq!(
            parse_age(""),
            Err(PetValidationError::AgeNotNumber(String::new()))
        );
    }

    #[test]
    fn to_draft_normalizes_blank_optionals() {
        let form = PetForm {
            name: "  Rex ".to_string(),
            age: "3".to_string(),
            description: "   ".to_string(),
            photo: Some(String::new()),
        };
        let draft = form.to_draft().expect("valid form");
        assert_eq!(draft.name, "Rex");
        assert_eq!(draft.description, None);
        assert_eq!(draft.photo, None);
        assert_eq!(draft.id, None);
    }

    #[test]
    fn to_draft_requires_name() {
        let err = PetForm::new("   ", "3").to_draft().unwrap_err();
        assert_eq!(err, PetValidationError::NameRequired);
    }
}
