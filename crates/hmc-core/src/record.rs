//! Records populated from a schema and the subtree they were built from.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hmc_xml::{Element, Path};
use tracing::{debug, warn};

use crate::link;
use crate::schema::Schema;
use crate::DecodeError;

/// A record bound to its schema and to the subtree it was populated from.
///
/// Field values are a snapshot of the subtree taken at construction. The
/// record owns its subtree; nested records get their own copies of the
/// regions they cover.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    element: Element,
    values: Vec<Option<String>>,
}

impl Record {
    /// Populate every schema field from `element`.
    pub fn from_element(schema: Arc<Schema>, element: Element) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| field.path().text(&element))
            .collect();
        Record {
            schema,
            element,
            values,
        }
    }

    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Subtree this record was built from.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Stored value of a schema field; `None` when absent or undeclared.
    pub fn field(&self, name: &str) -> Option<&str> {
        let index = self.schema.position(name)?;
        self.values[index].as_deref()
    }

    /// All fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.name(), value.as_deref()))
    }

    /// Parse a field with [`FromStr`]; unparsable values count as absent.
    pub fn parse_field<T: FromStr>(&self, name: &str) -> Option<T> {
        let raw = self.field(name)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                debug!(type_name = %self.type_name(), field = name, raw, "unparsable field");
                None
            }
        }
    }

    /// Interpret a field as a boolean (`true`/`false`, any case).
    pub fn flag(&self, name: &str) -> Option<bool> {
        let raw = self.field(name)?;
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    /// Trimmed text at `expr` relative to this record's subtree.
    pub fn text(&self, expr: &str) -> Option<String> {
        self.path(expr)?.text(&self.element)
    }

    /// Attribute `name` on the element at `expr`.
    pub fn attribute(&self, expr: &str, name: &str) -> Option<String> {
        self.path(expr)?.attribute(&self.element, name)
    }

    /// Identifier from the `href` of the element at `expr`.
    pub fn link_id(&self, expr: &str, from_end: usize) -> Option<String> {
        let path = self.path(expr)?;
        link::id_from_link_at(&self.element, &path, from_end)
    }

    /// Identifiers from every link under the collection at `expr`.
    pub fn link_ids(&self, expr: &str, from_end: usize) -> Vec<String> {
        match self.path(expr) {
            Some(path) => link::ids_from_links(&self.element, &path, from_end),
            None => Vec::new(),
        }
    }

    /// Build a nested record from every element `expr` reaches, in order.
    pub fn children(&self, expr: &str, schema: &Arc<Schema>) -> Vec<Record> {
        let Some(path) = self.path(expr) else {
            return Vec::new();
        };
        path.find_all(&self.element)
            .into_iter()
            .map(|element| Record::from_element(Arc::clone(schema), element.clone()))
            .collect()
    }

    /// Write `value` into the editable field and its node in the subtree.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), DecodeError> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| DecodeError::UnknownField {
                type_name: self.type_name().to_string(),
                field: name.to_string(),
            })?;
        let field = &self.schema.fields()[index];
        if !field.is_editable() {
            return Err(DecodeError::ReadOnlyField {
                type_name: self.type_name().to_string(),
                field: name.to_string(),
            });
        }
        let node = field
            .path()
            .find_mut(&mut self.element)
            .ok_or_else(|| DecodeError::MissingNode {
                type_name: self.schema.type_name().to_string(),
                field: name.to_string(),
            })?;
        node.set_text(value);
        self.values[index] = field.path().text(&self.element);
        debug!(type_name = %self.schema.type_name(), field = name, value, "updated field");
        Ok(())
    }

    /// Serialise the owned subtree, including any in-place updates.
    pub fn to_xml(&self) -> Result<String, DecodeError> {
        Ok(self.element.to_xml()?)
    }

    fn path(&self, expr: &str) -> Option<Path> {
        match Path::parse(expr) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!(type_name = %self.type_name(), expr, %err, "invalid path expression");
                None
            }
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.type_name())?;
        for (name, value) in self.fields() {
            writeln!(f, "  {name}: {}", value.unwrap_or("-"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <LogicalPartition:LogicalPartition xmlns:LogicalPartition="urn:lpar">
            <PartitionName> lpar01 </PartitionName>
            <PartitionID>7</PartitionID>
            <IsVirtualServiceAttentionLEDOn>TRUE</IsVirtualServiceAttentionLEDOn>
            <PartitionMemoryConfiguration>
                <DesiredMemory>not-a-number</DesiredMemory>
            </PartitionMemoryConfiguration>
            <ClientNetworkAdapters>
                <link href="https://h/rest/api/uom/LogicalPartition/7/ClientNetworkAdapter/a"/>
                <link href="https://h/rest/api/uom/LogicalPartition/7/ClientNetworkAdapter/b"/>
            </ClientNetworkAdapters>
            <AssociatedManagedSystem href="https://h/rest/api/uom/ManagedSystem/ms1"/>
        </LogicalPartition:LogicalPartition>
    "#;

    fn schema() -> Arc<Schema> {
        let schema = Schema::from_table(
            "LogicalPartition",
            &[
                ("name", "PartitionName"),
                ("id", "PartitionID"),
                ("led", "IsVirtualServiceAttentionLEDOn"),
                ("memory", "PartitionMemoryConfiguration/DesiredMemory"),
                ("os", "OperatingSystemVersion"),
            ],
        )
        .and_then(|s| s.with_editable("name"))
        .expect("schema");
        Arc::new(schema)
    }

    fn record() -> Record {
        let element = hmc_xml::parse(FIXTURE).expect("parse fixture");
        Record::from_element(schema(), element)
    }

    #[test]
    fn populates_exactly_the_schema_fields() {
        let record = record();
        let fields: Vec<_> = record.fields().collect();
        assert_eq!(
            fields,
            vec![
                ("name", Some("lpar01")),
                ("id", Some("7")),
                ("led", Some("TRUE")),
                ("memory", Some("not-a-number")),
                ("os", None),
            ]
        );
        assert_eq!(record.field("undeclared"), None);
    }

    #[test]
    fn typed_helpers() {
        let record = record();
        assert_eq!(record.parse_field::<u32>("id"), Some(7));
        assert_eq!(record.parse_field::<u64>("memory"), None);
        assert_eq!(record.parse_field::<u64>("os"), None);
        assert_eq!(record.flag("led"), Some(true));
        assert_eq!(record.flag("name"), None);
    }

    #[test]
    fn relationships() {
        let record = record();
        assert_eq!(record.link_id("AssociatedManagedSystem", 1).as_deref(), Some("ms1"));
        assert_eq!(record.link_ids("ClientNetworkAdapters", 1), vec!["a", "b"]);
        assert_eq!(record.link_ids("ClientNetworkAdapters", 3), vec!["7", "7"]);
        assert_eq!(record.link_id("a//b", 1), None);
    }

    #[test]
    fn rename_updates_field_and_subtree() {
        let mut record = record();
        record.set_field("name", "lpar02").expect("rename");
        assert_eq!(record.field("name"), Some("lpar02"));
        assert_eq!(record.text("PartitionName").as_deref(), Some("lpar02"));
        let reread = Record::from_element(schema(), record.element().clone());
        assert_eq!(reread.field("name"), Some("lpar02"));
        assert!(record
            .to_xml()
            .expect("serialise")
            .contains("<PartitionName>lpar02</PartitionName>"));
    }

    #[test]
    fn rename_rejects_other_fields() {
        let mut record = record();
        let err = record.set_field("id", "8").unwrap_err();
        assert!(matches!(err, DecodeError::ReadOnlyField { .. }));
        let err = record.set_field("nope", "8").unwrap_err();
        assert!(matches!(err, DecodeError::UnknownField { .. }));
        assert_eq!(record.field("id"), Some("7"));
    }

    #[test]
    fn rename_without_node_fails() {
        let element = hmc_xml::parse("<LogicalPartition/>").expect("parse");
        let mut record = Record::from_element(schema(), element);
        let err = record.set_field("name", "x").unwrap_err();
        assert!(matches!(err, DecodeError::MissingNode { .. }));
    }

    #[test]
    fn nested_records() {
        let element = hmc_xml::parse(
            r#"<ManagedSystem>
                <IOAdapters>
                    <IOAdapterChoice><IOAdapter><AdapterID>1</AdapterID></IOAdapter></IOAdapterChoice>
                    <IOAdapterChoice><IOAdapter><AdapterID>2</AdapterID></IOAdapter></IOAdapterChoice>
                </IOAdapters>
            </ManagedSystem>"#,
        )
        .expect("parse");
        let parent = Record::from_element(Arc::new(Schema::new("ManagedSystem")), element);
        let adapter = Arc::new(Schema::from_table("IOAdapter", &[("id", "AdapterID")]).expect("schema"));
        let ids: Vec<_> = parent
            .children("IOAdapters/*/IOAdapter", &adapter)
            .iter()
            .map(|r| r.field("id").map(str::to_string))
            .collect();
        assert_eq!(ids, vec![Some("1".to_string()), Some("2".to_string())]);
    }

    #[test]
    fn display_lists_fields_in_order() {
        let text = record().to_string();
        assert_eq!(
            text,
            "LogicalPartition\n  name: lpar01\n  id: 7\n  led: TRUE\n  memory: not-a-number\n  os: -\n"
        );
    }
}
