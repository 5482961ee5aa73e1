//! Tests for the model provider glue
//!
//! The provider builds its model once, resolving the standard extension
//! points through the registry; build failures surface as resource errors,
//! never as raw registry errors.

use std::sync::Arc;

use mxr::container::{Binding, MemoryContainer};
use mxr::extensions::{Converter, Dictionary, ObjectFactory};
use mxr::model::{ModelBuilder, ModelProvider, ModelResource};
use mxr::registry::ExtensionRegistry;
use mxr::ResourceError;

use crate::fixtures::standard_registry;

fn two_entity_resource() -> ModelResource {
    ModelResource::new()
        .with_entity("Entity01")
        .with_entity("Entity02")
}

#[test]
fn test_provider_builds_and_caches_the_model() {
    let registry = standard_registry();
    let provider = ModelProvider::new(two_entity_resource(), &registry)
        .expect("model build over the standard container should succeed");

    let model = provider.get();
    assert!(model.entity("Entity01").is_some());
    assert!(model.entity("Entity02").is_some());
    assert!(model.entity("Entity03").is_none());
    assert_eq!(model.entity_names(), vec!["Entity01", "Entity02"]);
}

#[test]
fn test_provider_resolves_extensions() {
    let registry = standard_registry();
    let provider = ModelProvider::new(two_entity_resource(), &registry).unwrap();
    let model = provider.get();

    let factory = model
        .extension::<Arc<dyn ObjectFactory>>()
        .expect("the bound object factory should be resolved into the model");
    assert!(factory.instantiate("Entity01").is_some());

    let dictionaries = model.extensions_of::<Arc<dyn Dictionary>>();
    assert_eq!(dictionaries.len(), 2, "both dictionary bindings expected");

    assert!(
        model.extension::<Arc<dyn Converter>>().is_none(),
        "no converter is bound"
    );
}

#[test]
fn test_primary_extension_comes_first() {
    let registry = standard_registry();
    let model = ModelProvider::new(two_entity_resource(), &registry)
        .unwrap()
        .into_model();

    let first = model
        .extension::<Arc<dyn Dictionary>>()
        .expect("dictionaries are bound");
    assert_eq!(
        first.entries("countries"),
        vec!["NL", "HU"],
        "the primary binding must lead the group"
    );
}

#[test]
fn test_missing_resource_fails_the_build() {
    let registry = standard_registry();
    let result = ModelBuilder::new().extensions(&registry).build();
    assert!(matches!(result, Err(ResourceError::MissingResource)));
}

#[test]
fn test_duplicate_entity_fails_the_build() {
    let resource = ModelResource::new()
        .with_entity("Entity01")
        .with_entity("Entity01");
    let result = ModelBuilder::new().resource(resource).build();
    match result {
        Err(ResourceError::DuplicateEntity { name }) => assert_eq!(name, "Entity01"),
        other => panic!("expected a duplicate entity error, got {other:?}"),
    }
}

#[test]
fn test_registry_failure_surfaces_as_resource_error() {
    let container = MemoryContainer::builder()
        .with(Binding::provider(|| {
            Err::<Arc<dyn Dictionary>, _>(String::from("backing store offline"))
        }))
        .build()
        .unwrap();
    let registry = ExtensionRegistry::new(Arc::new(container));

    let result = ModelProvider::new(two_entity_resource(), &registry);
    assert!(
        matches!(result, Err(ResourceError::Extension { .. })),
        "a registry failure during the build must wrap as a resource error"
    );
}

#[test]
fn test_bare_build_without_registry() {
    let model = ModelBuilder::new()
        .resource(two_entity_resource())
        .build()
        .expect("a build without extensions is a bare model, not an error");
    assert!(model.extension::<Arc<dyn ObjectFactory>>().is_none());
    assert_eq!(model.entity_names().len(), 2);
}

#[test]
fn test_resource_deserializes_from_json() {
    let resource: ModelResource = serde_json::from_str(
        r#"{ "entities": [ { "name": "Entity01" }, { "name": "Entity02" } ] }"#,
    )
    .expect("resource descriptor should deserialize");
    assert_eq!(resource, two_entity_resource());
}
