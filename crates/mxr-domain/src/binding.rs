//! Binding identity types
//!
//! A binding associates a [`BindingKey`] with an instance inside a backing
//! container. The key is a runtime type token plus an optional qualifier;
//! the qualifier-less key of a type is its *primary* binding.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime token identifying a Rust type.
///
/// Wraps the type's [`TypeId`] together with its name so error messages and
/// logs can show something readable. Accepts unsized types, so trait objects
/// (`dyn Dictionary`) and handle types (`Arc<dyn Dictionary>`) both have
/// tokens.
#[derive(Clone, Copy, Debug)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Create the token for a type.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying type id.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name as captured at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

// Identity is the TypeId alone; the name is presentation only.
impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identifier of one binding inside a container.
///
/// Two keys are equal iff their type token and qualifier both match. Keys are
/// immutable; the container creates them at configuration time and the
/// registry only ever reads them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingKey {
    ty: TypeToken,
    qualifier: Option<String>,
}

impl BindingKey {
    /// Key of the primary (qualifier-less) binding for a type.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            ty: TypeToken::of::<T>(),
            qualifier: None,
        }
    }

    /// Key of a qualified binding for a type.
    pub fn named<T: ?Sized + 'static>(qualifier: impl Into<String>) -> Self {
        Self {
            ty: TypeToken::of::<T>(),
            qualifier: Some(qualifier.into()),
        }
    }

    /// Assemble a key from an existing token and optional qualifier.
    pub fn from_parts(ty: TypeToken, qualifier: Option<String>) -> Self {
        Self { ty, qualifier }
    }

    /// The declared type of the binding this key names.
    pub fn ty(&self) -> TypeToken {
        self.ty
    }

    /// The qualifier, absent for primary bindings.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Whether this key names a primary binding.
    pub fn is_primary(&self) -> bool {
        self.qualifier.is_none()
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{} (named {:?})", self.ty, q),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// One binding as enumerated by a container: its key plus the extra type
/// tokens the bound instance may be viewed as.
///
/// Rust has no runtime subtype relation, so the "implements" facts are
/// declared when the binding is configured. The declared type is the key's
/// type and is always assignable to itself.
#[derive(Clone, Debug)]
pub struct BindingDescriptor {
    key: BindingKey,
    assignable: Vec<TypeToken>,
}

impl BindingDescriptor {
    /// Describe a binding with the tokens it is additionally assignable to.
    pub fn new(key: BindingKey, assignable: Vec<TypeToken>) -> Self {
        Self { key, assignable }
    }

    /// The binding's key.
    pub fn key(&self) -> &BindingKey {
        &self.key
    }

    /// The binding's declared type.
    pub fn declared(&self) -> TypeToken {
        self.key.ty()
    }

    /// Covariant match: the declared type equals the requested one, or the
    /// binding was declared assignable to it.
    pub fn is_assignable_to(&self, ty: TypeToken) -> bool {
        self.declared() == ty || self.assignable.contains(&ty)
    }

    /// Consume the descriptor, keeping only the key.
    pub fn into_key(self) -> BindingKey {
        self.key
    }
}
