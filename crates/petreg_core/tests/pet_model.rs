use petreg_core::{Pet, PetDraft, PetId, PetValidationError};

#[test]
fn pet_serialization_uses_expected_wire_fields() {
    let mut pet = Pet::with_id(PetId::parse("1718000000000").unwrap(), "Rex", 3);
    pet.description = Some("loud".to_string());
    pet.photo = Some("file:///photos/rex.jpg".to_string());

    let json = serde_json::to_value(&pet).unwrap();
    assert_eq!(json["id"], "1718000000000");
    assert_eq!(json["name"], "Rex");
    assert_eq!(json["age"], 3);
    assert_eq!(json["description"], "loud");
    assert_eq!(json["photo"], "file:///photos/rex.jpg");

    let decoded: Pet = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, pet);
}

#[test]
fn absent_optionals_are_omitted() {
    let pet = Pet::with_id(PetId::parse("2").unwrap(), "Mia", 10);
    let json = serde_json::to_value(&pet).unwrap();
    let object = json.as_object().unwrap();

    assert!(!object.contains_key("description"));
    assert!(!object.contains_key("photo"));
}

#[test]
fn new_pet_has_generated_id_and_no_optionals() {
    let pet = Pet::new("Bo", 1);
    assert!(!pet.id.as_str().is_empty());
    assert_eq!(pet.description, None);
    assert_eq!(pet.photo, None);
    assert!(pet.validate().is_ok());
}

#[test]
fn name_collision_ignores_case() {
    let pet = Pet::new("Rex", 3);
    assert!(pet.name_collides_with("rEX"));
    assert!(!pet.name_collides_with("Rexy"));
}

#[test]
fn draft_validation_rejects_boundary_violations() {
    assert_eq!(
        PetDraft::new(" ", 3).validate().unwrap_err(),
        PetValidationError::NameRequired
    );
    assert_eq!(
        PetDraft::new("Rex", 0).validate().unwrap_err(),
        PetValidationError::AgeNotPositive
    );
}

#[test]
fn draft_roundtrips_through_pet() {
    let pet = Pet::new("Rex", 3);
    let draft = PetDraft::from(pet.clone());
    assert_eq!(draft.into_pet(), pet);
}
