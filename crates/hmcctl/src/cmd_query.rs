use std::path::PathBuf;

use anyhow::{Context, Result};
use hmc::xml::{Element, Path};
use serde::Serialize;
use tracing::info;

use crate::common;

#[derive(Debug, Serialize, PartialEq)]
struct Match {
    index: usize,
    element: String,
    value: Option<String>,
}

/// Evaluate `expr` against the tree; each match yields its trimmed text, or
/// the named attribute when `attr` is given.
fn query(root: &Element, expr: &str, attr: Option<&str>) -> Result<Vec<Match>> {
    let path = Path::parse(expr).with_context(|| format!("parse path expression {expr:?}"))?;
    Ok(path
        .find_all(root)
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            let value = match attr {
                Some(name) => node.attribute(name).map(str::to_string),
                None => {
                    let text = node.text().trim();
                    (!text.is_empty()).then(|| text.to_string())
                }
            };
            Match {
                index,
                element: node.name().to_string(),
                value,
            }
        })
        .collect())
}

pub fn run(file: PathBuf, expr: String, attr: Option<String>, json: bool) -> Result<()> {
    let root = common::load_tree(&file)?;
    let matches = query(&root, &expr, attr.as_deref())?;
    info!(path = %expr, count = matches.len(), "evaluated path");

    if json {
        common::print_json(&matches)?;
        return Ok(());
    }

    if matches.is_empty() {
        println!("No match for {expr}.");
        return Ok(());
    }
    for m in &matches {
        println!(
            "{:<4} {:<32} {}",
            m.index,
            m.element,
            common::or_dash(m.value.as_deref())
        );
    }

    Ok(())
}
