//! Per-instance field configuration.
//!
//! Every exportable instance owns one [`FieldConfig`] describing how its fields
//! are treated on export and import:
//! - nested instances (`instance_of`)
//! - typed arrays (`array_of`)
//! - typed dictionaries (`dict_of`)
//! - ignored fields (`ignore`), never exported nor imported
//!
//! The config is built once, in the type's constructor, and never shared.

use crate::{Error, TypeResolver};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Name of the field holding the config, seeded into every ignore list.
pub const DEFAULT_CONFIG_FIELD: &str = "export_config";

/// Container role a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleCategory {
    /// The field holds a single nested instance.
    Instance,
    /// The field holds a sequence of typed items.
    Array,
    /// The field holds a mapping of typed values.
    Dict,
}

impl RoleCategory {
    /// Canonical name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "of_fields",
            Self::Array => "in_array",
            Self::Dict => "in_dict",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instance" | "of_fields" | "ofFields" => Ok(Self::Instance),
            "array" | "in_array" | "inArray" => Ok(Self::Array),
            "dict" | "in_dict" | "inDict" => Ok(Self::Dict),
            other => Err(Error::UnknownCategory(other.to_string())),
        }
    }
}

/// Role markers for one field, consumed by [`FieldConfig::declare_field_roles`].
///
/// Markers are independent: a spec carrying several of them registers the
/// field under each one.
#[derive(Debug, Clone, Default)]
pub struct FieldSpec {
    pub array_of: Option<TypeResolver>,
    pub dict_of: Option<TypeResolver>,
    pub instance_of: Option<TypeResolver>,
    pub ignore: bool,
}

impl FieldSpec {
    /// Merges the markers of `other` into this spec; markers set on `other` win.
    #[must_use]
    pub fn and(self, other: FieldSpec) -> Self {
        Self {
            array_of: other.array_of.or(self.array_of),
            dict_of: other.dict_of.or(self.dict_of),
            instance_of: other.instance_of.or(self.instance_of),
            ignore: self.ignore || other.ignore,
        }
    }
}

/// Declares a sequence of items resolved by `resolver`.
pub fn array_of(resolver: impl Into<TypeResolver>) -> FieldSpec {
    FieldSpec {
        array_of: Some(resolver.into()),
        ..FieldSpec::default()
    }
}

/// Declares a mapping whose values are resolved by `resolver`.
pub fn dict_of(resolver: impl Into<TypeResolver>) -> FieldSpec {
    FieldSpec {
        dict_of: Some(resolver.into()),
        ..FieldSpec::default()
    }
}

/// Declares a single nested instance resolved by `resolver`.
pub fn instance_of(resolver: impl Into<TypeResolver>) -> FieldSpec {
    FieldSpec {
        instance_of: Some(resolver.into()),
        ..FieldSpec::default()
    }
}

/// Declares a field excluded from export and import.
pub fn ignore() -> FieldSpec {
    FieldSpec {
        ignore: true,
        ..FieldSpec::default()
    }
}

/// Field roles and ignore list of one exportable instance.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    instance_fields: BTreeMap<String, TypeResolver>,
    array_fields: BTreeMap<String, TypeResolver>,
    dict_fields: BTreeMap<String, TypeResolver>,
    ignored: Vec<String>,
    storage_field: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldConfig {
    /// Creates an empty config stored under [`DEFAULT_CONFIG_FIELD`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage_field(DEFAULT_CONFIG_FIELD)
    }

    /// Creates an empty config stored under a custom field name.
    /// That name is always ignored.
    #[must_use]
    pub fn with_storage_field(name: impl Into<String>) -> Self {
        let storage_field = name.into();
        Self {
            instance_fields: BTreeMap::new(),
            array_fields: BTreeMap::new(),
            dict_fields: BTreeMap::new(),
            ignored: vec![storage_field.clone()],
            storage_field,
        }
    }

    /// Name of the field holding this config.
    pub fn storage_field(&self) -> &str {
        &self.storage_field
    }

    /// Registers `field` under `category`, replacing any earlier resolver for
    /// the same pair.
    pub fn declare_role(
        &mut self,
        category: RoleCategory,
        field: impl Into<String>,
        resolver: impl Into<TypeResolver>,
    ) -> &mut Self {
        self.role_map_mut(category).insert(field.into(), resolver.into());
        self
    }

    /// Merges field-to-resolver mappings keyed by category name.
    /// Unknown category names are skipped.
    pub fn declare_roles<I, C, F>(&mut self, roles: I) -> &mut Self
    where
        I: IntoIterator<Item = (C, F)>,
        C: AsRef<str>,
        F: IntoIterator<Item = (String, TypeResolver)>,
    {
        for (name, fields) in roles {
            let Ok(category) = name.as_ref().parse::<RoleCategory>() else {
                debug!("Skipping unknown role category {:?}", name.as_ref());
                continue;
            };
            self.role_map_mut(category).extend(fields);
        }
        self
    }

    /// Routes each field's markers into the role maps and the ignore list.
    pub fn declare_field_roles<I, K>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, FieldSpec)>,
        K: Into<String>,
    {
        for (field, spec) in fields {
            let field = field.into();
            if let Some(resolver) = spec.dict_of {
                self.declare_role(RoleCategory::Dict, field.clone(), resolver);
            }
            if let Some(resolver) = spec.array_of {
                self.declare_role(RoleCategory::Array, field.clone(), resolver);
            }
            if let Some(resolver) = spec.instance_of {
                self.declare_role(RoleCategory::Instance, field.clone(), resolver);
            }
            if spec.ignore {
                self.ignored.push(field);
            }
        }
        self
    }

    /// Appends names to the ignore list. Duplicates are kept.
    pub fn exclude_fields<I, K>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Field-to-resolver map for `category`.
    pub fn roles(&self, category: RoleCategory) -> &BTreeMap<String, TypeResolver> {
        match category {
            RoleCategory::Instance => &self.instance_fields,
            RoleCategory::Array => &self.array_fields,
            RoleCategory::Dict => &self.dict_fields,
        }
    }

    /// Resolver registered for `field` under `category`.
    pub fn resolver(&self, category: RoleCategory, field: &str) -> Option<&TypeResolver> {
        self.roles(category).get(field)
    }

    /// Ignore list in declaration order, storage field first.
    pub fn ignored_fields(&self) -> &[String] {
        &self.ignored
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored.iter().any(|name| name == field)
    }

    fn role_map_mut(&mut self, category: RoleCategory) -> &mut BTreeMap<String, TypeResolver> {
        match category {
            RoleCategory::Instance => &mut self.instance_fields,
            RoleCategory::Array => &mut self.array_fields,
            RoleCategory::Dict => &mut self.dict_fields,
        }
    }
}
