//! Backing container port
//!
//! The registry never talks to a container's native API; it consumes this
//! minimal port. Any binding store that can resolve a key, resolve a type's
//! primary binding and enumerate everything it holds can back the registry.

pub mod memory;

use mxr_domain::{BindingDescriptor, BindingKey, ContainerError, SharedInstance, TypeToken};

pub use memory::{Binding, ContainerBuilder, MemoryContainer};

/// An enumerable store of bindings.
///
/// Implementations must be safe for concurrent reads (`Send + Sync`); the
/// registry documents but cannot enforce that the container is immutable once
/// handed over. Resolution may lazily construct a singleton instance; that
/// latency is the container's own.
pub trait ExtensionContainer: Send + Sync {
    /// Resolve the instance bound at exactly `key`.
    fn resolve(&self, key: &BindingKey) -> Result<SharedInstance, ContainerError>;

    /// Resolve the primary binding for a declared type.
    fn resolve_primary(&self, ty: TypeToken) -> Result<SharedInstance, ContainerError>;

    /// Enumerate every binding the container holds.
    ///
    /// No type index is assumed; callers filter the enumeration themselves.
    fn bindings(&self) -> Vec<BindingDescriptor>;
}
