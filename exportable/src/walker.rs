//! Container walkers shared by the export and import engines.
//!
//! Both walkers copy the container, then offer every non-null element to a
//! transform. The transform returns a replacement, or `None` to keep the
//! element as it was. Null elements are never offered and stay null.

use crate::{ElementKey, FieldValue};
use serde_json::Value;
use std::collections::BTreeMap;

/// Values that have a null form skipped by the walkers.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

impl Nullable for Value {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl Nullable for FieldValue {
    fn is_null(&self) -> bool {
        FieldValue::is_null(self)
    }
}

/// Rebuilds a sequence, replacing elements for which `f` yields a value.
/// Returns `None` for a missing sequence.
pub fn map_sequence<T, U, F>(seq: Option<&[T]>, mut f: F) -> Option<Vec<U>>
where
    T: Nullable + Clone,
    U: From<T>,
    F: FnMut(&T, ElementKey<'_>) -> Option<U>,
{
    let seq = seq?;
    let mapped = seq
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let replaced = if item.is_null() {
                None
            } else {
                f(item, ElementKey::Index(i))
            };
            replaced.unwrap_or_else(|| U::from(item.clone()))
        })
        .collect();
    Some(mapped)
}

/// Rebuilds a mapping, replacing values for which `f` yields a value.
/// Returns `None` for a missing mapping.
pub fn map_mapping<'a, M, T, U, F>(map: Option<M>, mut f: F) -> Option<BTreeMap<String, U>>
where
    M: IntoIterator<Item = (&'a String, &'a T)>,
    T: Nullable + Clone + 'a,
    U: From<T>,
    F: FnMut(&T, ElementKey<'_>) -> Option<U>,
{
    let map = map?;
    let mapped = map
        .into_iter()
        .map(|(key, value)| {
            let replaced = if value.is_null() {
                None
            } else {
                f(value, ElementKey::Name(key))
            };
            (key.clone(), replaced.unwrap_or_else(|| U::from(value.clone())))
        })
        .collect();
    Some(mapped)
}
