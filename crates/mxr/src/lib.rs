//! MXR - typed extension registry facade
//!
//! A model-construction pipeline needs pluggable collaborators (object
//! factories, converters, dictionaries) without caring which container holds
//! them. MXR translates an opaque, dynamically-typed binding store into a
//! uniform, strongly-typed, predictably-failing lookup interface.
//!
//! ## Architecture
//!
//! ```text
//! ModelProvider ──▶ ExtensionRegistry ──▶ dyn ExtensionContainer
//!   (build once)      (stateless facade)     (opaque binding store)
//! ```
//!
//! Read-only, single direction. The registry validates arguments, queries
//! the container, and wraps every container-native failure into the
//! [`RegistryError`] family at that one boundary.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use mxr::container::{Binding, MemoryContainer};
//! use mxr::extensions::Dictionary;
//! use mxr::registry::ExtensionRegistry;
//!
//! struct CountryDictionary;
//! impl Dictionary for CountryDictionary {
//!     fn entries(&self, name: &str) -> Vec<String> {
//!         match name {
//!             "countries" => vec!["NL".into(), "HU".into()],
//!             _ => Vec::new(),
//!         }
//!     }
//! }
//!
//! let container = MemoryContainer::builder()
//!     .with(Binding::instance(
//!         Arc::new(CountryDictionary) as Arc<dyn Dictionary>
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let registry = ExtensionRegistry::new(Arc::new(container));
//! let dictionary: Arc<dyn Dictionary> = registry.lookup().unwrap();
//! assert_eq!(dictionary.entries("countries").len(), 2);
//! ```

pub mod container;
pub mod extensions;
pub mod model;
pub mod registry;

pub use container::{Binding, ContainerBuilder, ExtensionContainer, MemoryContainer};
pub use model::{EntityDescriptor, Model, ModelBuilder, ModelProvider, ModelResource};
pub use registry::ExtensionRegistry;

// Re-export the domain layer so consumers need a single dependency.
pub use mxr_domain::{
    BindingDescriptor, BindingKey, ContainerError, RegistryError, ResourceError, Result,
    SharedInstance, TypeToken,
};
