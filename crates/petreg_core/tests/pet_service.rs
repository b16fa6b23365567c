use petreg_core::{
    AgeRange, AlertQueue, MemoryKeyValueStore, PetFilter, PetForm, PetId, PetRegistry,
    PetService, PetValidationError, RegistryConfig, RegistryError, ServiceError,
    DUPLICATE_PET_MESSAGE,
};
use std::sync::Arc;

async fn service_with_alerts() -> (PetService, Arc<AlertQueue>, MemoryKeyValueStore) {
    let store = MemoryKeyValueStore::new();
    let alerts = Arc::new(AlertQueue::new());
    let registry = PetRegistry::open(
        Arc::new(store.clone()),
        RegistryConfig::default(),
        alerts.clone(),
    )
    .await;
    (PetService::new(registry), alerts, store)
}

fn form(name: &str, age: &str, description: &str) -> PetForm {
    PetForm {
        name: name.to_string(),
        age: age.to_string(),
        description: description.to_string(),
        photo: None,
    }
}

#[tokio::test]
async fn create_then_edit_through_forms() {
    let (mut service, _alerts, _store) = service_with_alerts().await;

    let id = service.create_pet(&form("Rex", "3", "loud")).unwrap();
    let mut edit = form("Rex", "4", "");
    edit.photo = Some("content://media/42".to_string());
    service.edit_pet(&id, &edit).unwrap();

    let pet = service.registry().get(&id).unwrap();
    assert_eq!(pet.age, 4);
    assert_eq!(pet.description, None);
    assert_eq!(pet.photo.as_deref(), Some("content://media/42"));
}

#[tokio::test]
async fn invalid_forms_never_reach_the_registry() {
    let (mut service, _alerts, store) = service_with_alerts().await;

    let err = service.create_pet(&form("Rex", "zero", "")).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Validation(PetValidationError::AgeNotNumber("zero".to_string()))
    );
    let too_long = "x".repeat(201);
    assert!(matches!(
        service.create_pet(&form("Rex", "3", &too_long)),
        Err(ServiceError::Validation(
            PetValidationError::DescriptionTooLong { .. }
        ))
    ));
    service.flush().await;

    assert!(service.pets().is_empty());
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn duplicate_add_surfaces_notification() {
    let (mut service, alerts, _store) = service_with_alerts().await;

    service.create_pet(&form("Rex", "3", "")).unwrap();
    let err = service.create_pet(&form("rex", "5", "")).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Registry(RegistryError::DuplicateName { .. })
    ));
    assert_eq!(service.pets().len(), 1);
    assert_eq!(alerts.drain(), vec![DUPLICATE_PET_MESSAGE]);
}

#[tokio::test]
async fn remove_and_missing_ids() {
    let (mut service, _alerts, _store) = service_with_alerts().await;
    let id = service.create_pet(&form("Rex", "3", "")).unwrap();

    let removed = service.remove_pet(&id).unwrap();
    assert_eq!(removed.name, "Rex");

    let missing = PetId::generate();
    assert_eq!(
        service.remove_pet(&missing).unwrap_err(),
        ServiceError::Registry(RegistryError::NotFound(missing.clone()))
    );
    assert_eq!(
        service.edit_pet(&missing, &form("Ghost", "1", "")).unwrap_err(),
        ServiceError::Registry(RegistryError::NotFound(missing))
    );
}

#[tokio::test]
async fn visible_pets_and_search_read_current_state() {
    let (mut service, _alerts, _store) = service_with_alerts().await;
    service.create_pet(&form("Rex", "3", "loud")).unwrap();
    service.create_pet(&form("Mia", "10", "")).unwrap();

    let filter = PetFilter {
        query: String::new(),
        age_range: AgeRange::from_inputs("0", "5"),
        require_description: false,
    };
    let visible: Vec<&str> = service
        .visible_pets(&filter)
        .into_iter()
        .map(|pet| pet.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Rex"]);

    let found: Vec<&str> = service
        .search("MI")
        .into_iter()
        .map(|pet| pet.name.as_str())
        .collect();
    assert_eq!(found, vec!["Mia"]);

    service.close().await;
}

#[tokio::test]
async fn create_with_id_keeps_caller_id_and_rejects_reuse() {
    let (mut service, _alerts, _store) = service_with_alerts().await;
    let id = PetId::parse("1718000000000").unwrap();

    let created = service
        .create_pet_with_id(id.clone(), &form("Rex", "3", ""))
        .unwrap();
    assert_eq!(created, id);

    let err = service
        .create_pet_with_id(id.clone(), &form("Mia", "2", ""))
        .unwrap_err();
    assert_eq!(err, ServiceError::Registry(RegistryError::DuplicateId(id)));
}
