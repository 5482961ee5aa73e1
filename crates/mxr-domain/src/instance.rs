//! Erased instance handle
//!
//! Containers hand instances to the registry in type-erased form. The handle
//! keeps the [`TypeToken`] of the erased value so the registry can verify a
//! caller's expected type after resolution and report the actual type when
//! the check fails.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::binding::TypeToken;

/// A shared, type-erased instance produced by a backing container.
///
/// Cloning is cheap; the underlying value is reference counted.
#[derive(Clone)]
pub struct SharedInstance {
    value: Arc<dyn Any + Send + Sync>,
    ty: TypeToken,
}

impl SharedInstance {
    /// Erase a value. The token of `T` travels with the handle.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            ty: TypeToken::of::<T>(),
        }
    }

    /// Token of the erased value's type.
    pub fn type_token(&self) -> TypeToken {
        self.ty
    }

    /// Whether the erased value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the erased value as a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Recover the erased value by clone. Extension handles are typically
    /// `Arc<dyn Trait>`, so the clone is a reference-count bump.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for SharedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedInstance")
            .field("type", &self.ty.name())
            .finish_non_exhaustive()
    }
}
