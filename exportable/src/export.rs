//! Export engine: typed instance graph to plain data tree.

use crate::walker::{map_mapping, map_sequence};
use crate::{Exportable, FieldValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::trace;

/// Exports `instance` as a plain JSON object.
///
/// Ignored fields are left out; nested instances, and instances held in
/// sequences or mappings, are exported recursively.
pub fn export_value(instance: &dyn Exportable) -> Value {
    let config = instance.export_config();
    let mut snapshot = Map::new();

    for (name, value) in instance.fields() {
        if config.is_ignored(&name) {
            trace!("Not exporting ignored field {}", name);
            continue;
        }
        snapshot.insert(name, export_field(value));
    }

    Value::Object(snapshot)
}

/// Exports a sequence element by element. Elements without the export
/// capability pass through unchanged. `None` stays `None`.
pub fn export_sequence(items: Option<&[FieldValue]>) -> Option<Vec<Value>> {
    let exported = map_sequence(items, |item: &FieldValue, _| export_element(item))?;
    Some(exported.into_iter().map(export_field).collect())
}

/// Exports a mapping value by value, like [`export_sequence`].
pub fn export_mapping(entries: Option<&BTreeMap<String, FieldValue>>) -> Option<Map<String, Value>> {
    let exported = map_mapping(entries, |value: &FieldValue, _| export_element(value))?;
    Some(
        exported
            .into_iter()
            .map(|(key, value)| (key, export_field(value)))
            .collect(),
    )
}

/// Replacement for a container element, or `None` to keep it as is.
fn export_element(item: &FieldValue) -> Option<FieldValue> {
    match item {
        FieldValue::Plain(_) => None,
        FieldValue::Instance(inner) => Some(FieldValue::Plain(export_value(inner.as_ref()))),
        FieldValue::Sequence(_) | FieldValue::Mapping(_) => {
            Some(FieldValue::Plain(export_field(item.clone())))
        }
    }
}

pub(crate) fn export_field(value: FieldValue) -> Value {
    match value {
        FieldValue::Plain(v) => v,
        FieldValue::Instance(inner) => export_value(inner.as_ref()),
        FieldValue::Sequence(items) => {
            export_sequence(Some(items.as_slice())).map_or(Value::Null, Value::Array)
        }
        FieldValue::Mapping(entries) => {
            export_mapping(Some(&entries)).map_or(Value::Null, Value::Object)
        }
    }
}
