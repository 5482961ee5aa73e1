//! Domain layer for MXR
//!
//! Value objects shared by every layer of the registry: runtime type tokens,
//! binding identifiers, the erased instance handle, and the error taxonomy.
//! Everything here is immutable and free of I/O.

pub mod binding;
pub mod error;
pub mod instance;

pub use binding::{BindingDescriptor, BindingKey, TypeToken};
pub use error::{ContainerError, RegistryError, ResourceError, Result};
pub use instance::SharedInstance;
