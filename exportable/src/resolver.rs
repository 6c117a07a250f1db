//! Type resolution for typed containers and nested instances.

use crate::Exportable;
use serde_json::Value;
use std::any::{self, TypeId};
use std::fmt;
use std::sync::Arc;

/// Position of a fragment inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKey<'a> {
    /// Index into a sequence.
    Index(usize),
    /// Key of a mapping entry, or the field name for a nested instance.
    Name(&'a str),
}

impl fmt::Display for ElementKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A default-constructible exportable type, usable for instantiation.
#[derive(Clone, Copy)]
pub struct InstanceType {
    id: TypeId,
    name: &'static str,
    construct: fn() -> Box<dyn Exportable>,
}

fn construct_default<T>() -> Box<dyn Exportable>
where
    T: Exportable + Default,
{
    Box::new(T::default())
}

impl InstanceType {
    /// Describes `T`, instantiated through its `Default` impl.
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: Exportable + Default,
    {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
            construct: construct_default::<T>,
        }
    }

    /// Identity of the described type.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name, for diagnostics only.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Constructs a fresh default instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Exportable> {
        (self.construct)()
    }
}

impl PartialEq for InstanceType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InstanceType {}

impl fmt::Debug for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InstanceType").field(&self.name).finish()
    }
}

/// Shorthand for [`InstanceType::of`].
#[must_use]
pub fn type_of<T>() -> InstanceType
where
    T: Exportable + Default,
{
    InstanceType::of::<T>()
}

/// Signature of a resolver function: picks a type for a fragment, or `None`
/// to leave the fragment raw.
pub type ResolverFn = dyn Fn(&Value, ElementKey<'_>) -> Option<InstanceType> + Send + Sync;

/// Decides which type a data fragment becomes on import.
#[derive(Clone)]
pub enum TypeResolver {
    /// Always the same type, whatever the fragment looks like.
    Fixed(InstanceType),
    /// Type computed from the fragment and its key.
    Dynamic(Arc<ResolverFn>),
}

impl TypeResolver {
    /// Resolver that always yields `T`.
    #[must_use]
    pub fn fixed<T>() -> Self
    where
        T: Exportable + Default,
    {
        Self::Fixed(InstanceType::of::<T>())
    }

    /// Resolver backed by a function of the fragment's content.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, ElementKey<'_>) -> Option<InstanceType> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Returns the type to instantiate for `fragment`, if any.
    pub fn resolve(&self, fragment: &Value, key: ElementKey<'_>) -> Option<InstanceType> {
        match self {
            Self::Fixed(ty) => Some(*ty),
            Self::Dynamic(f) => f(fragment, key),
        }
    }

    /// True for [`TypeResolver::Fixed`].
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl From<InstanceType> for TypeResolver {
    fn from(ty: InstanceType) -> Self {
        Self::Fixed(ty)
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(ty) => f.debug_tuple("Fixed").field(&ty.name()).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
