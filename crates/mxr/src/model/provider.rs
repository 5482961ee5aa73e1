//! Model provider
//!
//! Builds the model exactly once, at construction, and hands out the cached
//! result afterwards. Construction is expected to run during application
//! initialization, before steady-state concurrent reads begin; the provider
//! itself is read-only once built.

use std::sync::Arc;

use mxr_domain::ResourceError;

use crate::extensions::{Converter, Dictionary, ObjectFactory};
use crate::model::{Model, ModelBuilder, ModelResource};
use crate::registry::ExtensionRegistry;

/// Provides a model built from a resource and a registry.
pub struct ModelProvider {
    model: Model,
}

impl ModelProvider {
    /// Build the model once, resolving the standard extension points
    /// (object factories, converters, dictionaries) through the registry.
    pub fn new(
        resource: ModelResource,
        registry: &ExtensionRegistry,
    ) -> Result<Self, ResourceError> {
        let model = ModelBuilder::new()
            .resource(resource)
            .extensions(registry)
            .extension_point::<Arc<dyn ObjectFactory>>()
            .extension_point::<Arc<dyn Converter>>()
            .extension_point::<Arc<dyn Dictionary>>()
            .build()?;
        Ok(Self { model })
    }

    /// The cached model.
    pub fn get(&self) -> &Model {
        &self.model
    }

    /// Consume the provider, keeping the model.
    pub fn into_model(self) -> Model {
        self.model
    }
}
