//! In-memory backing container
//!
//! A plain immutable map of bindings, built once through
//! [`ContainerBuilder`] and read-only afterwards. Instances are either eager
//! singletons or lazy singletons memoized on first successful provision.

use std::collections::HashMap;
use std::sync::OnceLock;

use mxr_domain::{BindingDescriptor, BindingKey, ContainerError, SharedInstance, TypeToken};

use super::ExtensionContainer;

type Factory = Box<dyn Fn() -> Result<SharedInstance, String> + Send + Sync>;

enum Producer {
    /// Eager singleton.
    Instance(SharedInstance),
    /// Lazy singleton; the cell memoizes the first successful provision.
    Provider { factory: Factory, cell: OnceLock<SharedInstance> },
}

/// One binding under configuration.
///
/// Declared with an eager instance or a lazy provider, then optionally
/// refined with a qualifier and extra assignability tokens:
///
/// ```
/// use std::sync::Arc;
/// use mxr::container::{Binding, MemoryContainer};
///
/// trait Dictionary: Send + Sync {}
/// struct IsoDictionary;
/// impl Dictionary for IsoDictionary {}
///
/// let container = MemoryContainer::builder()
///     .with(Binding::instance(Arc::new(IsoDictionary) as Arc<dyn Dictionary>))
///     .with(
///         Binding::instance(Arc::new(IsoDictionary) as Arc<dyn Dictionary>)
///             .named("iso-extended"),
///     )
///     .build()
///     .unwrap();
/// # let _ = container;
/// ```
pub struct Binding {
    ty: TypeToken,
    qualifier: Option<String>,
    assignable: Vec<TypeToken>,
    producer: Producer,
}

impl Binding {
    /// Bind an eager singleton instance. The binding's declared type is `T`.
    pub fn instance<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            ty: TypeToken::of::<T>(),
            qualifier: None,
            assignable: Vec::new(),
            producer: Producer::Instance(SharedInstance::new(value)),
        }
    }

    /// Bind a lazy singleton. The factory runs at most once per successful
    /// provision; its error message surfaces as a provision failure.
    pub fn provider<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, String> + Send + Sync + 'static,
    {
        Self {
            ty: TypeToken::of::<T>(),
            qualifier: None,
            assignable: Vec::new(),
            producer: Producer::Provider {
                factory: Box::new(move || factory().map(SharedInstance::new)),
                cell: OnceLock::new(),
            },
        }
    }

    /// Qualify the binding; unqualified bindings are primary.
    pub fn named(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Declare that the bound instance may also be viewed as `U`.
    pub fn assignable_to<U: ?Sized + 'static>(mut self) -> Self {
        self.assignable.push(TypeToken::of::<U>());
        self
    }

    fn key(&self) -> BindingKey {
        BindingKey::from_parts(self.ty, self.qualifier.clone())
    }
}

/// Collects bindings and freezes them into a [`MemoryContainer`].
#[derive(Default)]
pub struct ContainerBuilder {
    bindings: Vec<Binding>,
}

impl ContainerBuilder {
    /// Add a binding.
    pub fn with(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Freeze the container, rejecting duplicate keys.
    pub fn build(self) -> Result<MemoryContainer, ContainerError> {
        let mut entries: HashMap<BindingKey, Entry> = HashMap::with_capacity(self.bindings.len());
        for binding in self.bindings {
            let key = binding.key();
            if entries.contains_key(&key) {
                return Err(ContainerError::Duplicate {
                    key: key.to_string(),
                });
            }
            let descriptor = BindingDescriptor::new(key.clone(), binding.assignable);
            entries.insert(
                key,
                Entry {
                    descriptor,
                    producer: binding.producer,
                },
            );
        }
        Ok(MemoryContainer { entries })
    }
}

struct Entry {
    descriptor: BindingDescriptor,
    producer: Producer,
}

impl Entry {
    fn produce(&self, key: &BindingKey) -> Result<SharedInstance, ContainerError> {
        match &self.producer {
            Producer::Instance(instance) => Ok(instance.clone()),
            Producer::Provider { factory, cell } => {
                if let Some(instance) = cell.get() {
                    return Ok(instance.clone());
                }
                let instance = factory().map_err(|message| ContainerError::Provision {
                    key: key.to_string(),
                    message,
                })?;
                Ok(cell.get_or_init(|| instance).clone())
            }
        }
    }
}

/// Immutable map-backed container.
pub struct MemoryContainer {
    entries: HashMap<BindingKey, Entry>,
}

impl MemoryContainer {
    /// Start configuring a container.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    /// Number of bindings held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the container holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExtensionContainer for MemoryContainer {
    fn resolve(&self, key: &BindingKey) -> Result<SharedInstance, ContainerError> {
        match self.entries.get(key) {
            Some(entry) => entry.produce(key),
            None => Err(ContainerError::Unbound {
                key: key.to_string(),
            }),
        }
    }

    fn resolve_primary(&self, ty: TypeToken) -> Result<SharedInstance, ContainerError> {
        let primary = BindingKey::from_parts(ty, None);
        if let Some(entry) = self.entries.get(&primary) {
            return entry.produce(&primary);
        }
        // No unqualified entry: a sole qualified binding of the declared type
        // still serves as primary; several are ambiguous.
        let mut candidates = self
            .entries
            .iter()
            .filter(|(key, _)| key.ty() == ty);
        match (candidates.next(), candidates.next()) {
            (Some((key, entry)), None) => entry.produce(key),
            (Some(_), Some(_)) => Err(ContainerError::Ambiguous {
                ty: ty.name().to_string(),
                count: self.entries.keys().filter(|key| key.ty() == ty).count(),
            }),
            (None, _) => Err(ContainerError::Unbound {
                key: ty.name().to_string(),
            }),
        }
    }

    fn bindings(&self) -> Vec<BindingDescriptor> {
        self.entries
            .values()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }
}
