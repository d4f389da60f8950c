use anyhow::{Context, Result};
use hmc::{Entity, Schema, TypeRegistry};
use serde::Serialize;
use tracing::info;

use crate::common;

#[derive(Debug, Serialize)]
struct FieldEntry<'a> {
    name: &'a str,
    path: &'a str,
    editable: bool,
}

#[derive(Debug, Serialize)]
struct TypeEntry<'a> {
    type_name: &'a str,
    /// `entry` for top-level types, `subtree` for nested records.
    kind: &'static str,
    fields: Vec<FieldEntry<'a>>,
}

fn type_entry<'a>(schema: &'a Schema, kind: &'static str) -> TypeEntry<'a> {
    TypeEntry {
        type_name: schema.type_name(),
        kind,
        fields: schema
            .fields()
            .iter()
            .map(|f| FieldEntry {
                name: f.name(),
                path: f.path().as_str(),
                editable: f.is_editable(),
            })
            .collect(),
    }
}

fn catalog(registry: &TypeRegistry<Entity>) -> Vec<TypeEntry<'_>> {
    let kinds = registry
        .type_names()
        .into_iter()
        .map(|name| (name, "entry"))
        .chain(registry.subtree_names().into_iter().map(|name| (name, "subtree")));
    kinds
        .filter_map(|(name, kind)| registry.schema(name).map(|s| type_entry(s, kind)))
        .collect()
}

pub fn run(json: bool) -> Result<()> {
    let registry = hmc::standard_registry().context("build entity registry")?;
    let entries = catalog(&registry);
    info!(count = entries.len(), "registered types");

    if json {
        common::print_json(&entries)?;
        return Ok(());
    }

    println!("{:<24} {:<8} {}", "TYPE", "KIND", "FIELDS");
    for entry in &entries {
        let fields: Vec<String> = entry
            .fields
            .iter()
            .map(|f| {
                if f.editable {
                    format!("{}*", f.name)
                } else {
                    f.name.to_string()
                }
            })
            .collect();
        println!("{:<24} {:<8} {}", entry.type_name, entry.kind, fields.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_entry_and_subtree_types() {
        let registry = hmc::standard_registry().expect("registry");
        let entries = catalog(&registry);
        assert_eq!(
            entries.len(),
            registry.type_names().len() + registry.subtree_names().len()
        );
        let lpar = entries
            .iter()
            .find(|e| e.type_name == "LogicalPartition")
            .expect("partition listed");
        assert_eq!(lpar.kind, "entry");
        let name = &lpar.fields[0];
        assert_eq!((name.name, name.path, name.editable), ("name", "PartitionName", true));
        assert!(entries
            .iter()
            .any(|e| e.type_name == "IOAdapter" && e.kind == "subtree"));
    }
}
