//! Import engine: plain data tree to typed instance graph.

use crate::walker::{map_mapping, map_sequence};
use crate::{
    decode, export_value, ElementKey, Exportable, FieldConfig, FieldValue, Result, RoleCategory,
    TypeResolver,
};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Imports `data` into `instance`.
///
/// Missing or null data leaves the instance untouched. Otherwise ignored
/// fields are stripped, every remaining top-level key is assigned as a plain
/// value, and fields with a declared role are then replaced by their typed
/// form.
pub fn import_into(instance: &mut dyn Exportable, data: Option<&Value>) {
    let Some(data) = data.filter(|d| !d.is_null()) else {
        return;
    };

    let assignments = plan_assignments(instance.export_config(), data);
    for (name, value) in assignments {
        if !instance.assign_field(&name, value) {
            trace!("Field {} did not accept the imported value", name);
        }
    }
}

/// Ordered field writes for one import. Later writes for the same field win.
fn plan_assignments(config: &FieldConfig, data: &Value) -> Vec<(String, FieldValue)> {
    let data: Map<String, Value> = match data {
        Value::Object(entries) => entries
            .iter()
            .filter(|(name, _)| !config.is_ignored(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
        other => {
            debug!("Import data is not an object ({}); importing no fields", other);
            Map::new()
        }
    };

    let mut assignments: Vec<(String, FieldValue)> = data
        .iter()
        .map(|(name, value)| (name.clone(), FieldValue::Plain(value.clone())))
        .collect();

    for (field, resolver) in config.roles(RoleCategory::Array) {
        if let Some(raw) = data.get(field) {
            let value = import_sequence(Some(raw), Some(resolver)).unwrap_or_default();
            assignments.push((field.clone(), value));
        }
    }

    for (field, resolver) in config.roles(RoleCategory::Dict) {
        if let Some(raw) = data.get(field) {
            let value = import_mapping(Some(raw), Some(resolver)).unwrap_or_default();
            assignments.push((field.clone(), value));
        }
    }

    for (field, resolver) in config.roles(RoleCategory::Instance) {
        if config.is_ignored(field) {
            continue;
        }
        match data.get(field) {
            None | Some(Value::Null) => assignments.push((field.clone(), FieldValue::NULL)),
            Some(raw) => match import_element(raw, ElementKey::Name(field), resolver) {
                Some(value) => assignments.push((field.clone(), value)),
                None => debug!("No type resolved for field {}; keeping the raw value", field),
            },
        }
    }

    assignments
}

/// Imports a raw sequence, instantiating each element the resolver has a
/// type for.
///
/// Missing or null input yields `None`. Without a resolver, or when the raw
/// value is not a sequence, it is returned unchanged.
pub fn import_sequence(raw: Option<&Value>, resolver: Option<&TypeResolver>) -> Option<FieldValue> {
    let raw = raw.filter(|v| !v.is_null())?;
    let Some(resolver) = resolver else {
        return Some(FieldValue::Plain(raw.clone()));
    };

    match raw {
        Value::Array(items) => map_sequence(Some(items.as_slice()), |item: &Value, key| {
            import_element(item, key, resolver)
        })
        .map(FieldValue::Sequence),
        other => {
            debug!("Expected a sequence, got {}; leaving it raw", other);
            Some(FieldValue::Plain(other.clone()))
        }
    }
}

/// Imports a raw mapping value by value, like [`import_sequence`].
pub fn import_mapping(raw: Option<&Value>, resolver: Option<&TypeResolver>) -> Option<FieldValue> {
    let raw = raw.filter(|v| !v.is_null())?;
    let Some(resolver) = resolver else {
        return Some(FieldValue::Plain(raw.clone()));
    };

    match raw {
        Value::Object(entries) => map_mapping(Some(entries), |value: &Value, key| {
            import_element(value, key, resolver)
        })
        .map(FieldValue::Mapping),
        other => {
            debug!("Expected a mapping, got {}; leaving it raw", other);
            Some(FieldValue::Plain(other.clone()))
        }
    }
}

/// A fresh instance of the resolved type filled from `raw`, or `None` when
/// the resolver has no type for it.
fn import_element(raw: &Value, key: ElementKey<'_>, resolver: &TypeResolver) -> Option<FieldValue> {
    let Some(ty) = resolver.resolve(raw, key) else {
        trace!("No type resolved for element {}; leaving it raw", key);
        return None;
    };
    let mut instance = ty.instantiate();
    import_into(instance.as_mut(), Some(raw));
    Some(FieldValue::Instance(instance))
}

/// Builds a default `T` and imports `data` into it. Missing or null data
/// yields `None`.
pub fn create_from<T>(data: Option<&Value>) -> Option<T>
where
    T: Exportable + Default,
{
    create_from_with(data, T::default)
}

/// Like [`create_from`], constructing the instance with `ctor`.
pub fn create_from_with<T, F>(data: Option<&Value>, ctor: F) -> Option<T>
where
    T: Exportable,
    F: FnOnce() -> T,
{
    let data = data.filter(|d| !d.is_null())?;
    let mut instance = ctor();
    import_into(&mut instance, Some(data));
    Some(instance)
}

/// Decodes JSON text and imports it into a default `T`.
///
/// Blank text yields the untouched default instance; malformed text is an
/// error.
pub fn create_from_json<T>(text: &str) -> Result<T>
where
    T: Exportable + Default,
{
    create_from_json_with(text, T::default)
}

/// Like [`create_from_json`], constructing the instance with `ctor`.
pub fn create_from_json_with<T, F>(text: &str, ctor: F) -> Result<T>
where
    T: Exportable,
    F: FnOnce() -> T,
{
    let mut instance = ctor();
    if text.trim().is_empty() {
        return Ok(instance);
    }
    let data = decode(text)?;
    import_into(&mut instance, Some(&data));
    Ok(instance)
}

/// Deep copy through export and re-import. Nested instances of the copy are
/// freshly constructed, never shared with the original.
pub fn clone_instance<T>(instance: &T) -> T
where
    T: Exportable + Default,
{
    clone_instance_with(instance, T::default)
}

/// Like [`clone_instance`], constructing the copy with `ctor`.
pub fn clone_instance_with<T, F>(instance: &T, ctor: F) -> T
where
    T: Exportable,
    F: FnOnce() -> T,
{
    let data = export_value(instance);
    let mut copy = ctor();
    import_into(&mut copy, Some(&data));
    copy
}
