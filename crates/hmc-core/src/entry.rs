//! Top-level entry records: envelope metadata around a content record.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use hmc_xml::Element;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;

use crate::link::{id_from_link, LAST_SEGMENT};
use crate::record::Record;
use crate::schema::Schema;

pub(crate) const CONTENT: &str = "content";
pub(crate) const DISCRIMINANT: &str = "type";

/// Type name selected by a content-type discriminant.
///
/// `application/vnd.ibm.powervm.uom+xml; type=ManagedSystem` yields
/// `ManagedSystem`. A discriminant without `=` is taken whole.
pub fn type_name_from_discriminant(discriminant: &str) -> Option<&str> {
    let name = discriminant
        .rsplit_once('=')
        .map_or(discriminant, |(_, name)| name)
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Entity element inside an entry's content wrapper, if the wrapper exists
/// and is non-empty.
pub(crate) fn content_root(entry: &Element) -> Option<&Element> {
    entry.child(CONTENT)?.children().first()
}

/// A record decoded from an `<entry>` envelope.
///
/// Dereferences to the content [`Record`], so schema fields and the
/// `text`/`attribute`/link helpers work directly on an entry.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    id: Option<String>,
    published: Option<OffsetDateTime>,
    self_link: Option<String>,
    etag: Option<String>,
    content_type: String,
    content: Record,
}

impl EntryRecord {
    /// Build from an entry element. Returns `None` when the content wrapper
    /// is missing, empty, or carries no discriminant.
    pub fn from_entry(entry: &Element, schema: Arc<Schema>) -> Option<Self> {
        let content_type = entry.child(CONTENT)?.attribute(DISCRIMINANT)?.to_string();
        let root = content_root(entry)?;
        Some(EntryRecord {
            id: child_text(entry, "id"),
            published: published(entry),
            self_link: self_link(entry),
            etag: child_text(entry, "etag"),
            content_type,
            content: Record::from_element(schema, root.clone()),
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The entry `<id>`, or the last segment of the self link.
    pub fn uuid(&self) -> Option<String> {
        self.id
            .clone()
            .or_else(|| id_from_link(self.self_link.as_deref()?, LAST_SEGMENT))
    }

    pub fn published(&self) -> Option<OffsetDateTime> {
        self.published
    }

    pub fn self_link(&self) -> Option<&str> {
        self.self_link.as_deref()
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Raw discriminant, e.g. `application/vnd.ibm.powervm.uom+xml; type=Cluster`.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &Record {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Record {
        &mut self.content
    }

    pub fn into_content(self) -> Record {
        self.content
    }
}

impl Deref for EntryRecord {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.content
    }
}

impl DerefMut for EntryRecord {
    fn deref_mut(&mut self) -> &mut Record {
        &mut self.content
    }
}

pub(crate) fn child_text(entry: &Element, name: &str) -> Option<String> {
    let text = entry.child(name)?.text().trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn self_link(entry: &Element) -> Option<String> {
    entry
        .children()
        .iter()
        .find(|c| c.local_name() == "link" && c.attribute("rel") == Some("SELF"))
        .and_then(|link| link.attribute("href"))
        .map(str::to_string)
}

fn published(entry: &Element) -> Option<OffsetDateTime> {
    let raw = child_text(entry, "published")?;
    match OffsetDateTime::parse(&raw, &Rfc3339) {
        Ok(ts) => Some(ts),
        Err(err) => {
            debug!(raw = %raw, %err, "ignoring malformed published timestamp");
            None
        }
    }
}
