use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use hmc::xml::{self, Element};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Path argument meaning "read standard input".
pub const STDIN: &str = "-";

/// Read a saved response body, or standard input for `-`.
pub fn read_document(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read document from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Read and parse a saved response body into a tree.
pub fn load_tree(path: &Path) -> Result<Element> {
    let text = read_document(path)?;
    xml::parse(&text).with_context(|| format!("parse {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}

pub fn format_time(ts: OffsetDateTime) -> Result<String> {
    ts.format(&Rfc3339).context("format timestamp")
}

/// Placeholder for absent values in table output.
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
