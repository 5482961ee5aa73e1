//! Error handling types
//!
//! Three families, one per boundary:
//!
//! - [`RegistryError`]: what every registry operation surfaces to callers.
//!   Container-native errors never cross the registry boundary; they are
//!   wrapped here with the requested type or key as context.
//! - [`ContainerError`]: the backing container's native failures.
//! - [`ResourceError`]: failures of the one-time model build, distinct from
//!   lookup failures.

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Uniform failure contract of the extension registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A required argument was absent
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the missing argument
        message: String,
    },

    /// No binding exists for the requested type or key
    #[error("no binding found for {requested}")]
    NotFound {
        /// The type or key that was requested
        requested: String,
        /// The container error that signalled the absence, if any
        #[source]
        source: Option<ContainerError>,
    },

    /// A binding was found but its instance has an incompatible type
    #[error("binding {key} resolved to type '{actual}', expected '{requested}'")]
    TypeMismatch {
        /// The type the caller asked for
        requested: &'static str,
        /// The runtime type of the bound instance
        actual: &'static str,
        /// The key that was resolved
        key: String,
    },

    /// The container reported an internal resolution error
    #[error("lookup of {requested} failed")]
    LookupFailure {
        /// The type or key that was requested
        requested: String,
        /// The underlying container error
        #[source]
        source: ContainerError,
    },
}

impl RegistryError {
    /// A required argument was absent
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Nothing is bound for the request
    pub fn not_found(requested: impl Into<String>, source: Option<ContainerError>) -> Self {
        Self::NotFound {
            requested: requested.into(),
            source,
        }
    }

    /// The bound instance's runtime type does not match the requested type
    pub fn type_mismatch(
        requested: &'static str,
        actual: &'static str,
        key: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            requested,
            actual,
            key: key.into(),
        }
    }

    /// The container failed while resolving the request
    pub fn lookup_failure(requested: impl Into<String>, source: ContainerError) -> Self {
        Self::LookupFailure {
            requested: requested.into(),
            source,
        }
    }
}

/// Native failures of a backing container
#[derive(Error, Debug)]
pub enum ContainerError {
    /// No binding exists for the key
    #[error("no binding for {key}")]
    Unbound {
        /// The key that was looked up
        key: String,
    },

    /// A type has several candidate bindings and no primary one
    #[error("ambiguous bindings for type '{ty}': {count} candidates, none primary")]
    Ambiguous {
        /// The requested type
        ty: String,
        /// How many bindings declare that type
        count: usize,
    },

    /// A lazy provider failed to produce its instance
    #[error("binding {key} failed to provision: {message}")]
    Provision {
        /// The key whose provider failed
        key: String,
        /// The provider's error message
        message: String,
    },

    /// Two bindings were configured with the same key
    #[error("duplicate binding for {key}")]
    Duplicate {
        /// The key bound more than once
        key: String,
    },
}

/// Failures of the one-time model build
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The builder was not given a model resource
    #[error("no model resource supplied")]
    MissingResource,

    /// The resource names the same entity twice
    #[error("duplicate entity '{name}' in model resource")]
    DuplicateEntity {
        /// The entity name that repeats
        name: String,
    },

    /// Resolving an extension through the registry failed
    #[error("failed to resolve a model extension")]
    Extension {
        /// The registry failure that aborted the build
        #[from]
        source: RegistryError,
    },
}
