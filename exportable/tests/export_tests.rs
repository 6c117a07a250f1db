mod fixtures;

use exportable::{
    encode, export_mapping, export_sequence, export_value, Exportable, FieldValue, ToField,
};
use fixtures::{furnished_room, furnished_room_data, Complaint, Room};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::BTreeMap;

// ── export_value ─────────────────────────────────────────────────

#[test]
fn furnished_room_exports_expected_tree() {
    assert_eq!(furnished_room().export_data(), furnished_room_data());
}

#[test]
fn empty_room_exports_null_settler_and_empty_containers() {
    assert_eq!(
        Room::new(4).export_data(),
        json!({"settler": null, "furniture": {}, "complaints": [], "area": 4})
    );
}

#[test]
fn ignored_field_is_never_exported() {
    let mut room = furnished_room();
    assert_eq!(room.calculate_price(), 16);
    assert_eq!(room.tmp_price, 16);

    let data = room.export_data();
    assert!(data.get("tmpPrice").is_none());
    assert!(data.get("export_config").is_none());
}

#[test]
fn export_through_trait_object() {
    let room: Box<dyn Exportable> = Box::new(furnished_room());
    assert_eq!(export_value(&*room), furnished_room_data());
}

#[test]
fn export_json_matches_encoded_export() {
    let room = furnished_room();
    let text = room.export_json(None).unwrap();
    assert_eq!(text, encode(&room.export_data(), None).unwrap());
}

#[test]
fn export_json_keeps_field_declaration_order() {
    let text = furnished_room().export_json(None).unwrap();
    assert_eq!(
        text,
        r#"{"settler":{"name":"guy"},"furniture":{"table":{"type":"table"}},"complaints":[{"message":"keke"},{"message":"no"}],"area":16}"#
    );
}

// ── export_sequence / export_mapping ─────────────────────────────

#[test]
fn export_sequence_of_none_is_none() {
    assert!(export_sequence(None).is_none());
}

#[test]
fn export_sequence_keeps_nulls_and_primitives() {
    let items = vec![furnished_room().to_field(), FieldValue::NULL, 7i64.to_field()];
    let exported = export_sequence(Some(items.as_slice())).unwrap();
    assert_eq!(exported, vec![furnished_room_data(), Value::Null, json!(7)]);
}

#[test]
fn export_mapping_of_none_is_none() {
    assert!(export_mapping(None).is_none());
}

#[test]
fn export_mapping_keeps_null_values() {
    let mut entries = BTreeMap::new();
    entries.insert("a".to_string(), furnished_room().to_field());
    entries.insert("b".to_string(), FieldValue::NULL);

    let exported = export_mapping(Some(&entries)).unwrap();
    assert_eq!(
        Value::Object(exported),
        json!({"a": furnished_room_data(), "b": null})
    );
}

#[test]
fn nested_containers_are_flattened() {
    let inner = FieldValue::Sequence(vec![Complaint::new("x").to_field()]);
    let mut by_key = BTreeMap::new();
    by_key.insert("k".to_string(), Complaint::new("y").to_field());
    let items = vec![inner, FieldValue::Mapping(by_key)];

    let exported = export_sequence(Some(items.as_slice())).unwrap();
    assert_eq!(
        Value::Array(exported),
        json!([[{"message": "x"}], {"k": {"message": "y"}}])
    );
}

#[test]
fn into_plain_exports_instances() {
    let value = Some(Complaint::new("loud")).to_field();
    assert_eq!(value.into_plain(), json!({"message": "loud"}));
}
