//! Codec-level properties (spec §8's universally quantified properties).

use ods::codec::{decode_document, encode_document};
use ods::tag::{NamedTag, Tag};
use ods::Registries;

fn all_primitives() -> Vec<NamedTag> {
    vec![
        NamedTag::string("s", "hello"),
        NamedTag::int("i", -42),
        NamedTag::float("f", 1.5),
        NamedTag::double("d", 2.25),
        NamedTag::short("sh", -7),
        NamedTag::long("l", 123456789012),
        NamedTag::char("c", 'A' as u16),
        NamedTag::byte("b", -3),
        NamedTag::list("li", vec![Tag::Int(1), Tag::Int(2), Tag::Int(3)]),
        NamedTag::map(
            "m",
            vec![
                ("one".to_string(), Tag::Int(1)),
                ("two".to_string(), Tag::Int(2)),
            ],
        ),
        NamedTag::object("o", vec![NamedTag::string("inner", "value")]),
    ]
}

#[test]
fn decode_of_encode_is_identity() {
    let registries = Registries::new();
    let tags = all_primitives();
    let encoded = encode_document(&tags, &registries).unwrap();
    let decoded = decode_document(&encoded, &registries).unwrap();
    assert_eq!(decoded, tags);
}

#[test]
fn encoded_length_matches_body_size_plus_five() {
    let registries = Registries::new();
    for tag in all_primitives() {
        let encoded = encode_document(std::slice::from_ref(&tag), &registries).unwrap();
        let body_size = ods::header::read_header(&encoded, 0).unwrap().body_size;
        assert_eq!(encoded.len(), body_size as usize + 5);
    }
}

#[test]
fn object_children_span_its_entire_value_region() {
    let registries = Registries::new();
    let tags = vec![NamedTag::object(
        "Car",
        vec![
            NamedTag::string("type", "Jeep"),
            NamedTag::int("gas", 30),
        ],
    )];
    let encoded = encode_document(&tags, &registries).unwrap();
    let header = ods::header::read_header(&encoded, 0).unwrap();

    let expected_children_bytes: usize = match &tags[0].value {
        Tag::Object(children) => children
            .iter()
            .map(|c| {
                let mut buf = Vec::new();
                ods::codec::encode_tag(&mut buf, c, &registries).unwrap();
                buf.len()
            })
            .sum(),
        _ => unreachable!(),
    };
    assert_eq!(header.value_len(), expected_children_bytes);
}

#[test]
fn map_key_round_trips_as_child_name() {
    let registries = Registries::new();
    let tags = vec![NamedTag::map(
        "scores",
        vec![("alice".to_string(), Tag::Int(10))],
    )];
    let encoded = encode_document(&tags, &registries).unwrap();
    let decoded = decode_document(&encoded, &registries).unwrap();
    match &decoded[0].value {
        Tag::Map(entries) => {
            assert_eq!(entries[0].0, "alice");
            assert_eq!(entries[0].1, Tag::Int(10));
        }
        other => panic!("expected Map, got {other:?}"),
    }
}

#[test]
fn list_children_are_unnamed_on_the_wire() {
    let registries = Registries::new();
    let tags = vec![NamedTag::list("xs", vec![Tag::Int(1)])];
    let encoded = encode_document(&tags, &registries).unwrap();
    // Skip the List tag's own header + name to reach the first child's header.
    let header = ods::header::read_header(&encoded, 0).unwrap();
    let child_pos = 7 + header.name_len as usize;
    let child_header = ods::header::read_header(&encoded, child_pos).unwrap();
    assert_eq!(child_header.name_len, 0);
}
