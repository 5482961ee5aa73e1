//! Extension registry facade
//!
//! [`ExtensionRegistry`] gives a model-construction pipeline uniform typed
//! access to whatever container backs it. It is a stateless, cache-free
//! pass-through: every operation validates its arguments, queries the
//! container, and translates the container's native errors into the
//! [`RegistryError`] family at that single boundary.
//!
//! Two surfaces are offered. The dynamic one works on [`TypeToken`]s and
//! [`BindingKey`]s and uses `Option` to make an absent argument expressible
//! (and rejectable, before any container access). The generic one is the
//! ergonomic face for Rust callers whose requested type is known at compile
//! time.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use mxr_domain::{BindingKey, ContainerError, RegistryError, Result, SharedInstance, TypeToken};

use crate::container::ExtensionContainer;

/// Typed lookup facade over one backing container.
///
/// Holds a shared reference to the container, never ownership of its
/// lifecycle. All operations take `&self` and are reentrant; concurrent use
/// is safe provided the container is safe for concurrent reads, which the
/// registry documents but cannot enforce.
#[derive(Clone)]
pub struct ExtensionRegistry {
    container: Arc<dyn ExtensionContainer>,
}

impl ExtensionRegistry {
    /// Wrap a container. The container is passed in explicitly; the registry
    /// never reaches for ambient global state.
    pub fn new(container: Arc<dyn ExtensionContainer>) -> Self {
        Self { container }
    }

    /// Resolve the primary binding of a type.
    ///
    /// Exact-type semantics: the container is asked for the declared type
    /// itself, not for assignable subtypes. This asymmetry with
    /// [`lookup_all`](Self::lookup_all) is deliberate.
    pub fn lookup_by_type(&self, ty: Option<TypeToken>) -> Result<SharedInstance> {
        let ty = require(ty, "type")?;
        debug!(ty = %ty, "looking up primary binding");
        self.container
            .resolve_primary(ty)
            .map_err(|err| wrap_container_error(ty.name(), err))
    }

    /// Resolve a binding by key, verifying the instance's type.
    ///
    /// Container resolution is key-driven, not type-driven, so the caller's
    /// expected type is checked against the resolved instance after the
    /// fact; a mismatch reports the requested type, the key, and the
    /// instance's actual type.
    pub fn lookup_by_key(
        &self,
        ty: Option<TypeToken>,
        key: Option<&BindingKey>,
    ) -> Result<SharedInstance> {
        let ty = require(ty, "type")?;
        let key = require(key, "key")?;
        debug!(ty = %ty, key = %key, "looking up keyed binding");
        let instance = self
            .container
            .resolve(key)
            .map_err(|err| wrap_container_error(key.to_string(), err))?;
        if instance.type_token() == ty {
            Ok(instance)
        } else {
            Err(RegistryError::type_mismatch(
                ty.name(),
                instance.type_token().name(),
                key.to_string(),
            ))
        }
    }

    /// Resolve a binding by key, without a type check.
    pub fn lookup_by_identifier(&self, key: Option<&BindingKey>) -> Result<SharedInstance> {
        let key = require(key, "key")?;
        debug!(key = %key, "looking up binding");
        self.container
            .resolve(key)
            .map_err(|err| wrap_container_error(key.to_string(), err))
    }

    /// Collect the keys of every binding assignable to a type.
    ///
    /// Scans the container's full enumeration and filters it here; no type
    /// index is assumed. Covariant match: a binding counts when its declared
    /// type equals the requested one or was declared assignable to it. An
    /// empty result is a set, never an error.
    pub fn lookup_all(&self, ty: Option<TypeToken>) -> Result<HashSet<BindingKey>> {
        let ty = require(ty, "type")?;
        debug!(ty = %ty, "looking up all assignable bindings");
        Ok(self.matching_keys(ty))
    }

    /// Typed form of [`lookup_by_type`](Self::lookup_by_type).
    pub fn lookup<T>(&self) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let ty = TypeToken::of::<T>();
        let instance = self.lookup_by_type(Some(ty))?;
        downcast_resolved(&instance, ty)
    }

    /// Typed form of [`lookup_by_key`](Self::lookup_by_key).
    pub fn lookup_keyed<T>(&self, key: &BindingKey) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let ty = TypeToken::of::<T>();
        let instance = self.lookup_by_key(Some(ty), Some(key))?;
        downcast_resolved(&instance, ty)
    }

    /// Typed form of [`lookup_all`](Self::lookup_all). Infallible: the type
    /// argument cannot be absent.
    pub fn lookup_all_of<T: ?Sized + 'static>(&self) -> HashSet<BindingKey> {
        self.matching_keys(TypeToken::of::<T>())
    }

    fn matching_keys(&self, ty: TypeToken) -> HashSet<BindingKey> {
        self.container
            .bindings()
            .into_iter()
            .filter(|descriptor| descriptor.is_assignable_to(ty))
            .map(mxr_domain::BindingDescriptor::into_key)
            .collect()
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry").finish_non_exhaustive()
    }
}

/// Reject an absent argument before any container access.
fn require<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| RegistryError::invalid_argument(format!("{what} must be supplied")))
}

/// The single point where container-native errors cross into the registry's
/// error family.
fn wrap_container_error(requested: impl Into<String>, err: ContainerError) -> RegistryError {
    match err {
        ContainerError::Unbound { .. } => RegistryError::not_found(requested, Some(err)),
        other => RegistryError::lookup_failure(requested, other),
    }
}

/// Recover the typed value from a resolved instance. The dynamic surface has
/// already matched tokens, so a failure here still reports as a mismatch
/// rather than panicking.
fn downcast_resolved<T>(instance: &SharedInstance, ty: TypeToken) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
{
    instance.downcast::<T>().ok_or_else(|| {
        RegistryError::type_mismatch(ty.name(), instance.type_token().name(), ty.name())
    })
}
