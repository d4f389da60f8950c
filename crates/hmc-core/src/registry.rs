//! Discriminant registry plus the entry and feed decoders.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hmc_xml::Element;
use tracing::{debug, trace, warn};

use crate::entry::{
    child_text, content_root, type_name_from_discriminant, EntryRecord, CONTENT, DISCRIMINANT,
};
use crate::schema::Schema;
use crate::DecodeError;

const ENTRY: &str = "entry";
const FEED: &str = "feed";

/// Builds a concrete value from a populated entry record. The registry is
/// passed along so builders can look up schemas for nested records.
pub type Build<T> = fn(EntryRecord, &TypeRegistry<T>) -> Result<T, DecodeError>;

/// What a feed decode does with an entry whose type is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTypePolicy {
    /// Skip the entry, record it in [`Feed::skipped`], keep decoding.
    #[default]
    Skip,
    /// Abort the whole feed with [`DecodeError::UnknownType`].
    Fail,
}

/// Knobs for feed decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub unknown_types: UnknownTypePolicy,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        DecodeOptions {
            unknown_types: UnknownTypePolicy::Fail,
        }
    }
}

/// Entry skipped because its type had no registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub entry_id: Option<String>,
    pub type_name: String,
}

/// Result of decoding a feed: records in document order plus skipped entries.
#[derive(Debug, Clone)]
pub struct Feed<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedEntry>,
}

impl<T> Feed<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Feed {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> IntoIterator for Feed<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Feed<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

struct Registration<T> {
    schema: Arc<Schema>,
    build: Build<T>,
}

/// Immutable-after-setup map from type name to schema and builder.
///
/// Entry types carry a builder; subtree types (records nested inside an
/// entity, never top-level entries) only carry a schema.
pub struct TypeRegistry<T> {
    entries: HashMap<String, Registration<T>>,
    subtrees: HashMap<String, Arc<Schema>>,
}

impl<T> TypeRegistry<T> {
    pub fn new() -> Self {
        TypeRegistry {
            entries: HashMap::new(),
            subtrees: HashMap::new(),
        }
    }

    /// Register an entry type under its schema's type name.
    pub fn register(&mut self, schema: Schema, build: Build<T>) -> Result<(), DecodeError> {
        let name = schema.type_name().to_string();
        if self.contains(&name) {
            return Err(DecodeError::Duplicate(name));
        }
        debug!(type_name = %name, fields = schema.len(), "registered entry type");
        self.entries.insert(
            name,
            Registration {
                schema: Arc::new(schema),
                build,
            },
        );
        Ok(())
    }

    /// Register a schema for records nested inside entries.
    pub fn register_subtree(&mut self, schema: Schema) -> Result<(), DecodeError> {
        let name = schema.type_name().to_string();
        if self.contains(&name) {
            return Err(DecodeError::Duplicate(name));
        }
        debug!(type_name = %name, fields = schema.len(), "registered subtree type");
        self.subtrees.insert(name, Arc::new(schema));
        Ok(())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name) || self.subtrees.contains_key(type_name)
    }

    /// Schema of an entry or subtree type.
    pub fn schema(&self, type_name: &str) -> Option<&Arc<Schema>> {
        self.entries
            .get(type_name)
            .map(|r| &r.schema)
            .or_else(|| self.subtrees.get(type_name))
    }

    /// Schema of a subtree type, for builders assembling nested records.
    pub fn subtree_schema(&self, type_name: &str) -> Result<Arc<Schema>, DecodeError> {
        self.subtrees
            .get(type_name)
            .cloned()
            .ok_or_else(|| DecodeError::MissingSchema(type_name.to_string()))
    }

    /// Registered entry type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered subtree type names, sorted.
    pub fn subtree_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.subtrees.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Decode one `<entry>` element.
    ///
    /// Returns `Ok(None)` when the content wrapper or discriminant is absent,
    /// or when `expected` is given and differs from the entry's type. Fails
    /// with [`DecodeError::UnknownType`] when the type has no registration.
    pub fn decode_entry(
        &self,
        entry: &Element,
        expected: Option<&str>,
    ) -> Result<Option<T>, DecodeError> {
        let Some(content) = entry.child(CONTENT) else {
            debug!("entry without content wrapper");
            return Ok(None);
        };
        if content_root(entry).is_none() {
            debug!("entry with empty content wrapper");
            return Ok(None);
        }
        let Some(type_name) = content
            .attribute(DISCRIMINANT)
            .and_then(type_name_from_discriminant)
        else {
            debug!("entry content without discriminant");
            return Ok(None);
        };
        if let Some(expected) = expected {
            if expected != type_name {
                trace!(type_name, expected, "entry filtered by type");
                return Ok(None);
            }
        }
        let registration = self
            .entries
            .get(type_name)
            .ok_or_else(|| DecodeError::UnknownType(type_name.to_string()))?;
        let Some(record) = EntryRecord::from_entry(entry, Arc::clone(&registration.schema)) else {
            return Ok(None);
        };
        let value = (registration.build)(record, self)?;
        debug!(type_name, "decoded entry");
        Ok(Some(value))
    }

    /// Decode every entry of a feed element in document order.
    ///
    /// A root that is itself an `<entry>` decodes as a one-entry feed; any
    /// other root yields an empty feed. Entries decoding to nothing are
    /// dropped. Unknown types follow `options.unknown_types`.
    pub fn decode_feed(
        &self,
        root: &Element,
        filter: Option<&str>,
        options: &DecodeOptions,
    ) -> Result<Feed<T>, DecodeError> {
        let entries: Vec<&Element> = match root.local_name() {
            FEED => root
                .children()
                .iter()
                .filter(|c| c.local_name() == ENTRY)
                .collect(),
            ENTRY => vec![root],
            other => {
                debug!(root = other, "document is neither feed nor entry");
                Vec::new()
            }
        };

        let mut feed = Feed::default();
        for entry in entries {
            match self.decode_entry(entry, filter) {
                Ok(Some(value)) => feed.records.push(value),
                Ok(None) => {}
                Err(DecodeError::UnknownType(type_name))
                    if options.unknown_types == UnknownTypePolicy::Skip =>
                {
                    let entry_id = child_text(entry, "id");
                    warn!(type_name = %type_name, entry_id = ?entry_id, "skipping entry of unknown type");
                    feed.skipped.push(SkippedEntry {
                        entry_id,
                        type_name,
                    });
                }
                Err(err) => return Err(err),
            }
        }
        debug!(
            decoded = feed.records.len(),
            skipped = feed.skipped.len(),
            "decoded feed"
        );
        Ok(feed)
    }
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

impl<T> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("entries", &self.type_names())
            .field("subtrees", &self.subtree_names())
            .finish()
    }
}
