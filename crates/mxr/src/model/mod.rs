//! Model assembly
//!
//! The read-side consumer of the registry: a [`ModelResource`] describes the
//! model's structure, a [`ModelBuilder`] resolves the pluggable extensions
//! through an [`ExtensionRegistry`](crate::registry::ExtensionRegistry), and
//! the resulting [`Model`] is immutable. How the resource gets loaded is out
//! of scope here; it arrives as a value.

pub mod provider;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use mxr_domain::{ResourceError, SharedInstance, TypeToken};

use crate::registry::ExtensionRegistry;

pub use provider::ModelProvider;

/// One entity of the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Entity name, unique within the resource.
    pub name: String,
}

impl EntityDescriptor {
    /// Describe an entity by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Declarative description of a model's structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResource {
    /// The entities the model is made of.
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,
}

impl ModelResource {
    /// An empty resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity.
    pub fn with_entity(mut self, name: impl Into<String>) -> Self {
        self.entities.push(EntityDescriptor::new(name));
        self
    }
}

/// An assembled model: entities plus the extensions resolved for it.
///
/// Built once and read-only afterwards; opaque to the registry.
pub struct Model {
    entities: HashMap<String, EntityDescriptor>,
    extensions: HashMap<TypeToken, Vec<SharedInstance>>,
}

impl Model {
    /// Look up an entity by name.
    pub fn entity(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities.get(name)
    }

    /// The names of all entities, sorted.
    pub fn entity_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The first resolved extension usable as `T`, primary bindings first.
    pub fn extension<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions
            .get(&TypeToken::of::<T>())
            .and_then(|group| group.iter().find_map(SharedInstance::downcast::<T>))
    }

    /// Every resolved extension usable as `T`, primary bindings first.
    pub fn extensions_of<T>(&self) -> Vec<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions
            .get(&TypeToken::of::<T>())
            .map(|group| {
                group
                    .iter()
                    .filter_map(SharedInstance::downcast::<T>)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("entities", &self.entities.len())
            .field("extension_points", &self.extensions.len())
            .finish()
    }
}

/// Builds a [`Model`] from a resource and a registry.
pub struct ModelBuilder<'a> {
    resource: Option<ModelResource>,
    registry: Option<&'a ExtensionRegistry>,
    points: Vec<TypeToken>,
}

impl<'a> ModelBuilder<'a> {
    /// Start an empty build.
    pub fn new() -> Self {
        Self {
            resource: None,
            registry: None,
            points: Vec::new(),
        }
    }

    /// Supply the model resource. Required.
    pub fn resource(mut self, resource: ModelResource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Supply the registry extensions are resolved through. Without it the
    /// model is built bare, with no extensions.
    pub fn extensions(mut self, registry: &'a ExtensionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register an extension point to resolve: every binding assignable to
    /// `T` is collected for the model.
    pub fn extension_point<T: ?Sized + 'static>(mut self) -> Self {
        self.points.push(TypeToken::of::<T>());
        self
    }

    /// Assemble the model. Fails on a missing resource, a duplicate entity
    /// name, or any registry failure while resolving extensions.
    pub fn build(self) -> Result<Model, ResourceError> {
        let resource = self.resource.ok_or(ResourceError::MissingResource)?;

        let mut entities = HashMap::with_capacity(resource.entities.len());
        for entity in resource.entities {
            if entities.contains_key(&entity.name) {
                return Err(ResourceError::DuplicateEntity { name: entity.name });
            }
            entities.insert(entity.name.clone(), entity);
        }

        let mut extensions: HashMap<TypeToken, Vec<SharedInstance>> = HashMap::new();
        if let Some(registry) = self.registry {
            for point in self.points {
                let mut keys: Vec<_> = registry.lookup_all(Some(point))?.into_iter().collect();
                // Primary binding first, then qualified ones in name order.
                keys.sort_by_key(|key| (!key.is_primary(), key.qualifier().map(str::to_owned)));
                let mut group = Vec::with_capacity(keys.len());
                for key in &keys {
                    group.push(registry.lookup_by_identifier(Some(key))?);
                }
                if !group.is_empty() {
                    extensions.insert(point, group);
                }
            }
        }

        debug!(
            entities = entities.len(),
            extension_points = extensions.len(),
            "model assembled"
        );
        Ok(Model {
            entities,
            extensions,
        })
    }
}

impl Default for ModelBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
