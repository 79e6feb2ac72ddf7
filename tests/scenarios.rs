//! End-to-end scenarios, one per test.

use ods::tag::{NamedTag, Tag};
use ods::{Container, Registries};

fn car_document() -> Vec<NamedTag> {
    vec![NamedTag::object(
        "Car",
        vec![
            NamedTag::string("type", "Jeep"),
            NamedTag::int("gas", 30),
            NamedTag::object(
                "Owner",
                vec![
                    NamedTag::string("firstName", "Jeff"),
                    NamedTag::string("lastName", "Bob"),
                    NamedTag::int("Age", 30),
                ],
            ),
        ],
    )]
}

#[test]
fn primitive_round_trip() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container
        .save(&[
            NamedTag::string("ExampleKey", "This is an example string!"),
            NamedTag::int("ExampleInt", 754),
        ])
        .unwrap();

    let example = container.get("ExampleKey").unwrap().unwrap();
    assert_eq!(example.value.as_str(), Some("This is an example string!"));

    let example_int = container.get("ExampleInt").unwrap().unwrap();
    assert_eq!(example_int.value.as_i32(), Some(754));
}

#[test]
fn nested_get() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&car_document()).unwrap();

    assert_eq!(
        container
            .get("Car.Owner.firstName")
            .unwrap()
            .unwrap()
            .value
            .as_str(),
        Some("Jeff")
    );
    assert_eq!(
        container
            .get("Car.Owner.lastName")
            .unwrap()
            .unwrap()
            .value
            .as_str(),
        Some("Bob")
    );
    assert!(container.find("Car.Owner.Age").unwrap());
    assert!(!container.find("Car.Owner.Missing").unwrap());
}

#[test]
fn set_with_auto_create() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&car_document()).unwrap();

    container
        .set(
            "Car.Owner.MEGAOOF.MULTIPLEFILES.test",
            Some(NamedTag::string("Test", "test")),
        )
        .unwrap();

    let leaf = container
        .get("Car.Owner.MEGAOOF.MULTIPLEFILES.Test")
        .unwrap()
        .unwrap();
    assert_eq!(leaf.value.as_str(), Some("test"));

    // The container must still decode cleanly end to end.
    container.get_all().unwrap();
}

#[test]
fn replace_of_differing_size() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&car_document()).unwrap();

    let replaced = container
        .replace(
            "Car.Owner.firstName",
            &NamedTag::string("firstName", "Jeffrey"),
        )
        .unwrap();
    assert!(replaced);

    assert_eq!(
        container
            .get("Car.Owner.firstName")
            .unwrap()
            .unwrap()
            .value
            .as_str(),
        Some("Jeffrey")
    );
    container.get_all().unwrap();
}

#[test]
fn delete() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container.save(&car_document()).unwrap();

    let removed = container.delete("Car.gas").unwrap();
    assert!(removed);
    assert!(!container.find("Car.gas").unwrap());
    assert_eq!(
        container
            .get("Car.Owner.firstName")
            .unwrap()
            .unwrap()
            .value
            .as_str(),
        Some("Jeff")
    );
}

#[test]
fn compressed_object_barrier() {
    let registries = Registries::new();
    let mut container = Container::buffer(Vec::new(), &registries);
    container
        .save(&[NamedTag::object(
            "Car",
            vec![NamedTag::compressed_object(
                "SecureOwner",
                "identity",
                vec![
                    NamedTag::string("firstName", "Jeff"),
                    NamedTag::string("lastName", "Bob"),
                ],
            )],
        )])
        .unwrap();

    let err = container.get("Car.SecureOwner.firstName").unwrap_err();
    assert!(matches!(err, ods::Error::CompressedTraversal(_)));

    let secure_owner = container.get("Car.SecureOwner").unwrap().unwrap();
    match secure_owner.value {
        Tag::CompressedObject { children, .. } => {
            assert!(children.iter().any(|c| c.name == "firstName"));
        }
        other => panic!("expected a CompressedObject, got {other:?}"),
    }
}
