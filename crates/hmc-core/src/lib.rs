//! Schema-driven records: turn HMC entries and feeds into populated records.
//!
//! The engine knows nothing about concrete entity types. A [`TypeRegistry`]
//! maps content-type discriminants to a [`Schema`] and a build function; the
//! decoders locate the envelope, pick the registration, populate a [`Record`]
//! from the schema and hand it to the build function.

pub mod entry;
pub mod link;
pub mod record;
pub mod registry;
pub mod schema;

use thiserror::Error;

pub use entry::{type_name_from_discriminant, EntryRecord};
pub use hmc_xml::{Element, Path, XmlError};
pub use link::{id_from_link, id_from_link_at, ids_from_links, LAST_SEGMENT};
pub use record::Record;
pub use registry::{
    Build, DecodeOptions, Feed, SkippedEntry, TypeRegistry, UnknownTypePolicy,
};
pub use schema::{Field, Schema};

/// Error type produced while building schemas, registries, and records.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Document or path expression failure from the XML layer.
    #[error(transparent)]
    Xml(#[from] XmlError),
    /// The entry's discriminant names a type with no registration.
    #[error("unknown entity type: {0}")]
    UnknownType(String),
    /// A schema or registration for a type was requested but never registered.
    #[error("no schema registered for {0}")]
    MissingSchema(String),
    /// The same type name was registered twice.
    #[error("type registered twice: {0}")]
    Duplicate(String),
    /// The field exists but does not accept in-place updates.
    #[error("field {field} of {type_name} is read-only")]
    ReadOnlyField { type_name: String, field: String },
    /// The schema does not declare the field.
    #[error("{type_name} has no field {field}")]
    UnknownField { type_name: String, field: String },
    /// The field is declared but its node is absent from the subtree.
    #[error("field {field} of {type_name} has no node to update")]
    MissingNode { type_name: String, field: String },
    /// Schema definition violates a structural rule.
    #[error("invalid schema: {0}")]
    Invalid(String),
}
