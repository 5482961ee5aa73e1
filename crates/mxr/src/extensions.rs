//! Extension-point traits
//!
//! The pluggable collaborator seams a model pipeline retrieves through the
//! registry. All three are object safe and consumed as `Arc<dyn Trait>`
//! handles; bind the handle type (`Arc<dyn Dictionary>`) in the container so
//! typed lookups round-trip.
//!
//! No implementations ship here; they are supplied by whoever configures the
//! container.

use std::fmt;

use mxr_domain::SharedInstance;

/// Produces fresh instances for model entities.
pub trait ObjectFactory: Send + Sync {
    /// Produce a blank instance for the named entity, if this factory knows
    /// how to build one.
    fn instantiate(&self, entity: &str) -> Option<SharedInstance>;
}

/// Enumerates the values of named dictionaries (code lists, enumerations).
pub trait Dictionary: Send + Sync {
    /// The entries of the named dictionary, empty when unknown.
    fn entries(&self, name: &str) -> Vec<String>;
}

impl fmt::Debug for dyn Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Dictionary")
    }
}

/// Converts field values to and from their text form.
pub trait Converter: Send + Sync {
    /// Render a value as text, if this converter handles its type.
    fn to_text(&self, value: &SharedInstance) -> Option<String>;

    /// Parse a value from text, if this converter can.
    fn from_text(&self, text: &str) -> Option<SharedInstance>;
}

impl fmt::Debug for dyn Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Converter")
    }
}
