//! Shared fixtures: extension implementations, a probe container, and the
//! standard container configuration the lookup tests run against.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mxr::container::{Binding, ExtensionContainer, MemoryContainer};
use mxr::extensions::{Converter, Dictionary, ObjectFactory};
use mxr::registry::ExtensionRegistry;
use mxr::{BindingDescriptor, BindingKey, ContainerError, SharedInstance, TypeToken};

/// Dictionary backed by a fixed entry list.
pub struct StaticDictionary {
    entries: Vec<String>,
}

impl StaticDictionary {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

impl Dictionary for StaticDictionary {
    fn entries(&self, _name: &str) -> Vec<String> {
        self.entries.clone()
    }
}

/// Object factory that instantiates every entity as its name.
pub struct NameFactory;

impl ObjectFactory for NameFactory {
    fn instantiate(&self, entity: &str) -> Option<SharedInstance> {
        Some(SharedInstance::new(entity.to_string()))
    }
}

/// Converter for `String` values only.
pub struct TextConverter;

impl Converter for TextConverter {
    fn to_text(&self, value: &SharedInstance) -> Option<String> {
        value.downcast::<String>()
    }

    fn from_text(&self, text: &str) -> Option<SharedInstance> {
        Some(SharedInstance::new(text.to_string()))
    }
}

/// Container that counts every access and resolves nothing. Used to prove
/// that invalid arguments are rejected before any container call.
#[derive(Default)]
pub struct ProbeContainer {
    accesses: AtomicUsize,
}

impl ProbeContainer {
    pub fn accesses(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }
}

impl ExtensionContainer for ProbeContainer {
    fn resolve(&self, key: &BindingKey) -> Result<SharedInstance, ContainerError> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        Err(ContainerError::Unbound {
            key: key.to_string(),
        })
    }

    fn resolve_primary(&self, ty: TypeToken) -> Result<SharedInstance, ContainerError> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        Err(ContainerError::Unbound {
            key: ty.name().to_string(),
        })
    }

    fn bindings(&self) -> Vec<BindingDescriptor> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        Vec::new()
    }
}

/// The standard configuration most lookup tests run against: a primary
/// dictionary, a second dictionary named "d2", a lazily provided object
/// factory, and no converter at all.
pub fn standard_container() -> MemoryContainer {
    MemoryContainer::builder()
        .with(Binding::instance(
            Arc::new(StaticDictionary::new(["NL", "HU"])) as Arc<dyn Dictionary>,
        ))
        .with(
            Binding::instance(
                Arc::new(StaticDictionary::new(["EN"])) as Arc<dyn Dictionary>
            )
            .named("d2"),
        )
        .with(Binding::provider(|| {
            Ok(Arc::new(NameFactory) as Arc<dyn ObjectFactory>)
        }))
        .build()
        .expect("standard container must configure cleanly")
}

/// Registry over the standard container.
pub fn standard_registry() -> ExtensionRegistry {
    ExtensionRegistry::new(Arc::new(standard_container()))
}
