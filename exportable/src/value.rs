//! Live field values and conversions from/to Rust field types.

use crate::Exportable;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};

/// A field value as the engine sees it.
///
/// Plain values are primitives, null, or untyped JSON structures. Instances
/// carry the export capability. Sequences and mappings hold either.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Plain(Value),
    Instance(Box<dyn Exportable>),
    Sequence(Vec<FieldValue>),
    Mapping(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// The null value.
    pub const NULL: FieldValue = FieldValue::Plain(Value::Null);

    /// Wraps an exportable instance.
    pub fn instance<T>(value: T) -> Self
    where
        T: Exportable,
    {
        Self::Instance(Box::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Plain(Value::Null))
    }

    /// Borrows the instance, if this is one.
    pub fn as_instance(&self) -> Option<&dyn Exportable> {
        match self {
            Self::Instance(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }

    /// Takes the instance out if it is a `T`.
    pub fn into_instance<T>(self) -> Option<T>
    where
        T: Exportable,
    {
        match self {
            Self::Instance(inner) => {
                let any: Box<dyn Any> = inner;
                any.downcast::<T>().ok().map(|boxed| *boxed)
            }
            _ => None,
        }
    }

    /// Converts into `T` and stores it in `slot`. On a shape mismatch the slot
    /// is left alone and false is returned.
    pub fn assign_to<T: FromField>(self, slot: &mut T) -> bool {
        match T::from_field(self) {
            Some(value) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Flattens into a plain data tree, exporting every instance.
    pub fn into_plain(self) -> Value {
        crate::export::export_field(self)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Plain(value)
    }
}

impl From<Box<dyn Exportable>> for FieldValue {
    fn from(value: Box<dyn Exportable>) -> Self {
        Self::Instance(value)
    }
}

/// Conversion of a Rust field into a [`FieldValue`] snapshot.
pub trait ToField {
    fn to_field(&self) -> FieldValue;
}

/// Conversion of an imported [`FieldValue`] back into a Rust field.
///
/// Returns `None` when the value does not have the expected shape.
pub trait FromField: Sized {
    fn from_field(value: FieldValue) -> Option<Self>;
}

fn plain_to_field<T: Serialize>(value: &T) -> FieldValue {
    // Values with no JSON form (non-finite floats) degrade to null.
    FieldValue::Plain(serde_json::to_value(value).unwrap_or(Value::Null))
}

fn plain_from_field<T: DeserializeOwned>(value: FieldValue) -> Option<T> {
    match value {
        FieldValue::Plain(v) => serde_json::from_value(v).ok(),
        _ => None,
    }
}

macro_rules! plain_field {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToField for $ty {
            fn to_field(&self) -> FieldValue {
                plain_to_field(self)
            }
        }

        impl FromField for $ty {
            fn from_field(value: FieldValue) -> Option<Self> {
                plain_from_field(value)
            }
        }
    )+};
}

plain_field!(
    String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);

impl ToField for str {
    fn to_field(&self) -> FieldValue {
        FieldValue::Plain(Value::String(self.to_owned()))
    }
}

impl ToField for Value {
    fn to_field(&self) -> FieldValue {
        FieldValue::Plain(self.clone())
    }
}

impl FromField for Value {
    fn from_field(value: FieldValue) -> Option<Self> {
        Some(value.into_plain())
    }
}

impl ToField for FieldValue {
    fn to_field(&self) -> FieldValue {
        self.clone()
    }
}

impl FromField for FieldValue {
    fn from_field(value: FieldValue) -> Option<Self> {
        Some(value)
    }
}

impl ToField for Box<dyn Exportable> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Instance(self.clone())
    }
}

impl FromField for Box<dyn Exportable> {
    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Instance(inner) => Some(inner),
            _ => None,
        }
    }
}

impl<T: ToField> ToField for Option<T> {
    fn to_field(&self) -> FieldValue {
        match self {
            Some(inner) => inner.to_field(),
            None => FieldValue::NULL,
        }
    }
}

impl<T: FromField> FromField for Option<T> {
    fn from_field(value: FieldValue) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_field(value).map(Some)
    }
}

impl<T: ToField> ToField for Vec<T> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Sequence(self.iter().map(ToField::to_field).collect())
    }
}

impl<T: FromField> FromField for Vec<T> {
    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Sequence(items) => items.into_iter().map(T::from_field).collect(),
            FieldValue::Plain(Value::Array(items)) => items
                .into_iter()
                .map(|item| T::from_field(FieldValue::Plain(item)))
                .collect(),
            _ => None,
        }
    }
}

impl<T: ToField> ToField for BTreeMap<String, T> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Mapping(self.iter().map(|(k, v)| (k.clone(), v.to_field())).collect())
    }
}

impl<T: FromField> FromField for BTreeMap<String, T> {
    fn from_field(value: FieldValue) -> Option<Self> {
        mapping_entries(value)?
            .into_iter()
            .map(|(k, v)| T::from_field(v).map(|v| (k, v)))
            .collect()
    }
}

impl<T: ToField> ToField for HashMap<String, T> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Mapping(self.iter().map(|(k, v)| (k.clone(), v.to_field())).collect())
    }
}

impl<T: FromField> FromField for HashMap<String, T> {
    fn from_field(value: FieldValue) -> Option<Self> {
        mapping_entries(value)?
            .into_iter()
            .map(|(k, v)| T::from_field(v).map(|v| (k, v)))
            .collect()
    }
}

/// Entries of a mapping-shaped value, or `None` for any other shape.
fn mapping_entries(value: FieldValue) -> Option<Vec<(String, FieldValue)>> {
    match value {
        FieldValue::Mapping(entries) => Some(entries.into_iter().collect()),
        FieldValue::Plain(Value::Object(entries)) => Some(
            entries
                .into_iter()
                .map(|(k, v)| (k, FieldValue::Plain(v)))
                .collect(),
        ),
        _ => None,
    }
}

/// Implements [`ToField`] and [`FromField`] for exportable types, so they can
/// be used directly, or inside `Option`, `Vec` and maps, as struct fields.
///
/// ```ignore
/// exportable_fields!(Person, Furniture);
/// ```
#[macro_export]
macro_rules! exportable_fields {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::ToField for $ty {
            fn to_field(&self) -> $crate::FieldValue {
                $crate::FieldValue::instance(::std::clone::Clone::clone(self))
            }
        }

        impl $crate::FromField for $ty {
            fn from_field(value: $crate::FieldValue) -> ::std::option::Option<Self> {
                value.into_instance::<$ty>()
            }
        }
    )+};
}
