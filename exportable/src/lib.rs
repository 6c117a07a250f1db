//! Declarative export/import of typed object graphs.
//!
//! A type opts in by implementing [`Exportable`] and describing its fields in a
//! [`FieldConfig`] that it owns. The engine then converts instances to a plain
//! data tree (nested JSON objects, arrays and primitives) and rebuilds typed
//! instances from such a tree:
//! - [`FieldConfig`]: which fields hold nested instances, typed arrays or
//!   typed dictionaries, and which are ignored
//! - [`TypeResolver`]: a fixed type, or a function choosing a type from the
//!   shape of each data fragment
//! - [`export_value`] / [`import_into`]: the recursive export and import walks
//! - [`encode`] / [`decode`]: the JSON text boundary
//!
//! ```ignore
//! #[derive(Debug, Clone)]
//! struct Shelf {
//!     export_config: FieldConfig,
//!     books: Vec<Book>,
//! }
//!
//! impl Default for Shelf {
//!     fn default() -> Self {
//!         let mut export_config = FieldConfig::new();
//!         export_config.declare_field_roles([("books", array_of(type_of::<Book>()))]);
//!         Self { export_config, books: Vec::new() }
//!     }
//! }
//! ```

mod codec;
mod config;
mod export;
mod import;
mod resolver;
mod value;
mod walker;

use std::any::Any;
use std::fmt;

pub use codec::{decode, encode, encode_with, Replacer, MAX_INDENT};
pub use config::{
    array_of, dict_of, ignore, instance_of, FieldConfig, FieldSpec, RoleCategory,
    DEFAULT_CONFIG_FIELD,
};
pub use export::{export_mapping, export_sequence, export_value};
pub use import::{
    clone_instance, clone_instance_with, create_from, create_from_json, create_from_json_with,
    create_from_with, import_into, import_mapping, import_sequence,
};
pub use resolver::{type_of, ElementKey, InstanceType, TypeResolver};
pub use value::{FieldValue, FromField, ToField};
pub use walker::{map_mapping, map_sequence, Nullable};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine.
///
/// Missing or null data is never an error; those cases are no-ops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unknown role category: {0}")]
    UnknownCategory(String),
}

/// A typed value that can be exported to and imported from plain data.
///
/// Implementors store their [`FieldConfig`] in a named field (conventionally
/// `export_config`) and expose their fields reflectively through
/// [`fields`](Exportable::fields) and [`assign_field`](Exportable::assign_field).
pub trait Exportable: Any + fmt::Debug + ExportableClone {
    /// The field configuration owned by this instance.
    fn export_config(&self) -> &FieldConfig;

    /// Owned snapshot of every live field, keyed by field name.
    fn fields(&self) -> Vec<(String, FieldValue)>;

    /// Writes a single imported field.
    /// Returns false if the name is unknown or the value has the wrong shape.
    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool;

    /// Exports this instance as a plain data tree.
    fn export_data(&self) -> serde_json::Value
    where
        Self: Sized,
    {
        export_value(self)
    }

    /// Exports this instance and encodes it as JSON text.
    fn export_json(&self, indent: Option<usize>) -> Result<String>
    where
        Self: Sized,
    {
        encode(&self.export_data(), indent)
    }

    /// Imports plain data into this instance. `None` or null is a no-op.
    fn import_data(&mut self, data: Option<&serde_json::Value>) -> &mut Self
    where
        Self: Sized,
    {
        import_into(self, data);
        self
    }

    /// Decodes JSON text and imports it. Blank text is a no-op.
    fn import_json(&mut self, text: &str) -> Result<&mut Self>
    where
        Self: Sized,
    {
        if text.trim().is_empty() {
            return Ok(self);
        }
        let data = decode(text)?;
        Ok(self.import_data(Some(&data)))
    }

    /// Structural deep copy through an export/import round trip.
    fn copy(&self) -> Self
    where
        Self: Sized + Default,
    {
        clone_instance(self)
    }

    /// Like [`copy`](Exportable::copy), constructing the target with `ctor`.
    fn copy_with<F>(&self, ctor: F) -> Self
    where
        Self: Sized,
        F: FnOnce() -> Self,
    {
        clone_instance_with(self, ctor)
    }
}

/// Object-safe cloning for boxed exportables.
///
/// Blanket-implemented for every `Exportable + Clone`; never implement it by hand.
pub trait ExportableClone {
    fn clone_boxed(&self) -> Box<dyn Exportable>;
}

impl<T> ExportableClone for T
where
    T: Exportable + Clone,
{
    fn clone_boxed(&self) -> Box<dyn Exportable> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Exportable> {
    fn clone(&self) -> Self {
        (**self).clone_boxed()
    }
}
