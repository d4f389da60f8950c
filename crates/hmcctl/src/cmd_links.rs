use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use hmc::engine::ids_from_links;
use hmc::xml::{Element, Path};
use serde::Serialize;
use tracing::info;

use crate::common;

#[derive(Debug, Serialize)]
struct LinkIds<'a> {
    collection: &'a str,
    from_end: usize,
    ids: Vec<String>,
}

fn resolve(root: &Element, expr: &str, from_end: usize) -> Result<Vec<String>> {
    if from_end == 0 {
        bail!("--from-end counts from 1 (the last segment)");
    }
    let path = Path::parse(expr).with_context(|| format!("parse path expression {expr:?}"))?;
    Ok(ids_from_links(root, &path, from_end))
}

pub fn run(file: PathBuf, expr: String, from_end: usize, json: bool) -> Result<()> {
    let root = common::load_tree(&file)?;
    let ids = resolve(&root, &expr, from_end)?;
    info!(collection = %expr, count = ids.len(), "resolved link ids");

    if json {
        let payload = LinkIds {
            collection: &expr,
            from_end,
            ids,
        };
        common::print_json(&payload)?;
        return Ok(());
    }

    for id in &ids {
        println!("{id}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_keep_order_and_skip_unlinked() {
        let root = hmc::xml::parse(
            r#"<LogicalPartition>
                <ClientNetworkAdapters>
                    <link href="https://h/rest/api/uom/LogicalPartition/p1/ClientNetworkAdapter/a1"/>
                    <link rel="related"/>
                    <link href="https://h/rest/api/uom/LogicalPartition/p1/ClientNetworkAdapter/a2"/>
                </ClientNetworkAdapters>
            </LogicalPartition>"#,
        )
        .expect("parse");
        assert_eq!(
            resolve(&root, "ClientNetworkAdapters", 1).expect("resolve"),
            vec!["a1", "a2"]
        );
        assert_eq!(
            resolve(&root, "ClientNetworkAdapters", 3).expect("resolve"),
            vec!["p1", "p1"]
        );
        assert!(resolve(&root, "ClientNetworkAdapters", 0).is_err());
    }
}
