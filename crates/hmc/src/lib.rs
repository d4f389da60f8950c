#![cfg_attr(docsrs, feature(doc_cfg))]
//! High level HMC REST facade that re-exports the workspace crates and turns
//! response bodies into typed entities.
//!
//! ```rust,no_run
//! use hmc::{Decoder, Entity, HmcError};
//!
//! # fn fetch() -> String { String::new() }
//! # fn run() -> Result<(), HmcError> {
//! let decoder = Decoder::standard()?;
//! let body = fetch();
//! for entity in decoder.objects(&body, Some("LogicalPartition"))? {
//!     if let Entity::LogicalPartition(lpar) = entity {
//!         println!("{:?} {:?}", lpar.name(), lpar.state());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use hmc_catalog as catalog;
pub use hmc_core as engine;
pub use hmc_xml as xml;

pub use hmc_catalog::{
    standard_registry, ClientNetworkAdapter, Cluster, Entity, HttpErrorResponse, IoAdapter,
    JobParameter, JobResponse, JobStatus, LogicalPartition, ManagedSystem, ManagementConsole,
    PhysicalVolume, SharedStoragePool, VirtualIoServer, VirtualNetwork, VirtualSwitch,
};
pub use hmc_core::{
    DecodeError, DecodeOptions, EntryRecord, Feed, Record, Schema, SkippedEntry, TypeRegistry,
    UnknownTypePolicy,
};
pub use hmc_xml::{Element, Path, XmlError};

use thiserror::Error;
use tracing::debug;

const ENTRY: &str = "entry";

/// Error type produced by the high level facade.
#[derive(Debug, Error)]
pub enum HmcError {
    /// The response body is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] XmlError),
    /// Registry setup or entity decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Decoder facade combining a populated registry with decode options.
///
/// The registry is read-only once the decoder exists, so a decoder can be
/// shared across threads behind an `Arc` or a plain reference.
#[derive(Debug)]
pub struct Decoder {
    registry: TypeRegistry<Entity>,
    options: DecodeOptions,
}

impl Decoder {
    /// Create a decoder from an already populated registry.
    pub fn new(registry: TypeRegistry<Entity>) -> Self {
        Self {
            registry,
            options: DecodeOptions::default(),
        }
    }

    /// Decoder over every entity type in the catalog.
    pub fn standard() -> Result<Self, HmcError> {
        Ok(Self::new(standard_registry()?))
    }

    /// Replace the feed decoding options.
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Access the registry metadata.
    pub fn registry(&self) -> &TypeRegistry<Entity> {
        &self.registry
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a single-entry response body.
    ///
    /// Returns `Ok(None)` when the root is not an `<entry>`, the envelope is
    /// malformed, or `expected` names a different type.
    pub fn object(
        &self,
        document: &str,
        expected: Option<&str>,
    ) -> Result<Option<Entity>, HmcError> {
        let root = hmc_xml::parse(document)?;
        if root.local_name() != ENTRY {
            debug!(root = root.local_name(), "single-entry body without entry root");
            return Ok(None);
        }
        Ok(self.registry.decode_entry(&root, expected)?)
    }

    /// Decode a feed response body, keeping document order.
    ///
    /// An `<entry>` root is treated as a one-entry feed; any other root
    /// yields an empty feed.
    pub fn objects(&self, document: &str, filter: Option<&str>) -> Result<Feed<Entity>, HmcError> {
        let root = hmc_xml::parse(document)?;
        Ok(self.registry.decode_feed(&root, filter, &self.options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(type_name: &str, id: &str, body: &str) -> String {
        format!(
            r#"<entry>
                <id>{id}</id>
                <published>2015-02-03T10:11:12.000-06:00</published>
                <link rel="SELF" href="https://hmc:12443/rest/api/uom/{type_name}/{id}"/>
                <content type="application/vnd.ibm.powervm.uom+xml; type={type_name}">
                    <{type_name}:{type_name} xmlns:{type_name}="http://www.ibm.com/xmlns/systems/power/firmware/uom/mc/2012_10/">{body}</{type_name}:{type_name}>
                </content>
            </entry>"#
        )
    }

    fn decoder() -> Decoder {
        Decoder::standard().expect("standard decoder")
    }

    #[test]
    fn decodes_managed_system_name() {
        let body = entry("ManagedSystem", "ms1", "<SystemName>sys01</SystemName>");
        let Some(Entity::ManagedSystem(system)) = decoder().object(&body, None).expect("decode")
        else {
            panic!("expected a managed system");
        };
        assert_eq!(system.name(), Some("sys01"));
        assert_eq!(system.state(), None);
        assert_eq!(system.record().id(), Some("ms1"));
        assert!(system.record().published().is_some());
    }

    #[test]
    fn filter_mismatch_is_none() {
        let body = entry("ManagedSystem", "ms1", "<SystemName>sys01</SystemName>");
        let decoded = decoder()
            .object(&body, Some("LogicalPartition"))
            .expect("decode");
        assert!(decoded.is_none());
    }

    #[test]
    fn object_requires_entry_root() {
        let body = format!(
            "<feed>{}</feed>",
            entry("ManagedSystem", "ms1", "<SystemName>sys01</SystemName>")
        );
        assert!(decoder().object(&body, None).expect("decode").is_none());
    }

    #[test]
    fn feed_drops_entry_without_content() {
        let body = format!(
            "<feed>{}<entry><id>b</id></entry>{}</feed>",
            entry("ManagedSystem", "a", "<SystemName>sys01</SystemName>"),
            entry("LogicalPartition", "c", "<PartitionName>lpar1</PartitionName>"),
        );
        let feed = decoder().objects(&body, None).expect("decode feed");
        let ids: Vec<_> = feed.iter().filter_map(Entity::uuid).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(feed.records[0].type_name(), "ManagedSystem");
        assert_eq!(feed.records[1].type_name(), "LogicalPartition");
        assert!(feed.skipped.is_empty());
    }

    #[test]
    fn missing_published_is_absent() {
        let body = entry("LogicalPartition", "lpar1", "<PartitionName>lpar1</PartitionName><PartitionID>4</PartitionID>")
            .replace("<published>2015-02-03T10:11:12.000-06:00</published>", "");
        let Some(Entity::LogicalPartition(lpar)) = decoder().object(&body, None).expect("decode")
        else {
            panic!("expected a partition");
        };
        assert!(lpar.record().published().is_none());
        assert_eq!(lpar.name(), Some("lpar1"));
        assert_eq!(lpar.partition_id(), Some("4"));
    }

    #[test]
    fn unknown_types_follow_options() {
        let body = format!(
            "<feed>{}{}</feed>",
            entry("SRIOVAdapter", "x", ""),
            entry("ManagedSystem", "a", "<SystemName>sys01</SystemName>"),
        );
        let feed = decoder().objects(&body, None).expect("skip unknown");
        assert_eq!(feed.len(), 1);
        assert_eq!(
            feed.skipped,
            vec![SkippedEntry {
                entry_id: Some("x".into()),
                type_name: "SRIOVAdapter".into(),
            }]
        );

        let strict = decoder().with_options(DecodeOptions::strict());
        let err = strict.objects(&body, None).unwrap_err();
        assert!(matches!(
            err,
            HmcError::Decode(DecodeError::UnknownType(ref name)) if name == "SRIOVAdapter"
        ));

        let single = entry("SRIOVAdapter", "x", "");
        assert!(matches!(
            decoder().object(&single, None),
            Err(HmcError::Decode(DecodeError::UnknownType(_)))
        ));
    }

    #[test]
    fn entry_root_is_one_element_feed() {
        let body = entry("VirtualSwitch", "vs0", "<SwitchName>ETHERNET0</SwitchName>");
        let feed = decoder().objects(&body, None).expect("decode");
        assert_eq!(feed.len(), 1);
        let empty = decoder().objects("<other/>", None).expect("decode");
        assert!(empty.is_empty());
    }

    #[test]
    fn malformed_document_is_xml_error() {
        let err = decoder().objects("<feed><entry>", None).unwrap_err();
        assert!(matches!(err, HmcError::Xml(_)));
    }

    #[test]
    fn rename_then_reread() {
        let body = entry(
            "LogicalPartition",
            "lpar1",
            "<PartitionName>old</PartitionName>",
        );
        let Some(Entity::LogicalPartition(mut lpar)) =
            decoder().object(&body, None).expect("decode")
        else {
            panic!("expected a partition");
        };
        lpar.rename("new").expect("rename");
        assert_eq!(lpar.record().text("PartitionName").as_deref(), Some("new"));
        let reparsed = format!(
            "<entry><id>lpar1</id><content type=\"t; type=LogicalPartition\">{}</content></entry>",
            lpar.record().to_xml().expect("serialise")
        );
        let Some(Entity::LogicalPartition(again)) =
            decoder().object(&reparsed, None).expect("decode")
        else {
            panic!("expected a partition");
        };
        assert_eq!(again.name(), Some("new"));
    }

    #[test]
    fn decoder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Decoder>();
    }
}
