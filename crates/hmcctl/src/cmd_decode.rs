use std::path::PathBuf;

use anyhow::{Context, Result};
use hmc::{DecodeOptions, Decoder, Entity, Feed};
use serde::Serialize;
use tracing::{info, warn};

use crate::common;

#[derive(Debug, Serialize)]
struct FieldValue<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RecordView<'a> {
    type_name: &'a str,
    id: Option<String>,
    published: Option<String>,
    self_link: Option<&'a str>,
    etag: Option<&'a str>,
    fields: Vec<FieldValue<'a>>,
}

#[derive(Debug, Serialize)]
struct SkippedView<'a> {
    entry_id: Option<&'a str>,
    type_name: &'a str,
}

#[derive(Debug, Serialize)]
struct FeedView<'a> {
    records: Vec<RecordView<'a>>,
    skipped: Vec<SkippedView<'a>>,
}

fn record_view(entity: &Entity) -> Result<RecordView<'_>> {
    let entry = entity.entry();
    let published = entry.published().map(common::format_time).transpose()?;
    Ok(RecordView {
        type_name: entity.type_name(),
        id: entity.uuid(),
        published,
        self_link: entry.self_link(),
        etag: entry.etag(),
        fields: entry
            .fields()
            .map(|(name, value)| FieldValue { name, value })
            .collect(),
    })
}

fn feed_view(feed: &Feed<Entity>) -> Result<FeedView<'_>> {
    Ok(FeedView {
        records: feed.iter().map(record_view).collect::<Result<_>>()?,
        skipped: feed
            .skipped
            .iter()
            .map(|s| SkippedView {
                entry_id: s.entry_id.as_deref(),
                type_name: &s.type_name,
            })
            .collect(),
    })
}

fn decode(text: &str, type_name: Option<&str>, strict: bool) -> Result<Feed<Entity>> {
    let options = if strict {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };
    let decoder = Decoder::standard()
        .context("build entity registry")?
        .with_options(options);
    decoder.objects(text, type_name).context("decode document")
}

pub fn run(file: PathBuf, type_name: Option<String>, strict: bool, json: bool) -> Result<()> {
    let text = common::read_document(&file)?;
    let feed = decode(&text, type_name.as_deref(), strict)?;
    info!(
        file = %file.display(),
        records = feed.len(),
        skipped = feed.skipped.len(),
        "decoded document"
    );

    if json {
        common::print_json(&feed_view(&feed)?)?;
        return Ok(());
    }

    for skipped in &feed.skipped {
        warn!(
            type_name = %skipped.type_name,
            entry_id = common::or_dash(skipped.entry_id.as_deref()),
            "entry skipped"
        );
    }
    if feed.is_empty() {
        println!("No records decoded.");
        return Ok(());
    }
    for entity in &feed {
        let entry = entity.entry();
        println!("{entity}  id: {}", common::or_dash(entity.uuid().as_deref()));
        if let Some(ts) = entry.published() {
            println!("  published: {}", common::format_time(ts)?);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"
        <feed xmlns="http://www.w3.org/2005/Atom">
            <entry>
                <id>ms1</id>
                <published>2015-02-03T10:11:12Z</published>
                <content type="application/vnd.ibm.powervm.uom+xml; type=ManagedSystem">
                    <ManagedSystem:ManagedSystem xmlns:ManagedSystem="urn:ms">
                        <SystemName>sys01</SystemName>
                    </ManagedSystem:ManagedSystem>
                </content>
            </entry>
            <entry>
                <id>x1</id>
                <content type="application/vnd.ibm.powervm.uom+xml; type=SRIOVAdapter">
                    <SRIOVAdapter:SRIOVAdapter xmlns:SRIOVAdapter="urn:sriov"/>
                </content>
            </entry>
        </feed>
    "#;

    #[test]
    fn json_view_keeps_schema_order() {
        let feed = decode(FEED, None, false).expect("decode");
        let view = feed_view(&feed).expect("view");
        assert_eq!(view.records.len(), 1);
        let record = &view.records[0];
        assert_eq!(record.type_name, "ManagedSystem");
        assert_eq!(record.id.as_deref(), Some("ms1"));
        assert_eq!(record.published.as_deref(), Some("2015-02-03T10:11:12Z"));
        assert_eq!(record.fields[0].name, "name");
        assert_eq!(record.fields[0].value, Some("sys01"));
        assert!(record.fields[1..].iter().all(|f| f.value.is_none()));
        assert_eq!(view.skipped[0].type_name, "SRIOVAdapter");
        assert_eq!(view.skipped[0].entry_id, Some("x1"));

        let json = serde_json::to_value(&view).expect("json");
        assert_eq!(json["records"][0]["fields"][0]["value"], "sys01");
    }

    #[test]
    fn strict_mode_fails_on_unknown_type() {
        let err = decode(FEED, None, true).unwrap_err();
        assert!(format!("{err:#}").contains("SRIOVAdapter"));
    }

    #[test]
    fn type_filter_applies() {
        let feed = decode(FEED, Some("LogicalPartition"), false).expect("decode");
        assert!(feed.is_empty());
        assert!(feed.skipped.is_empty());
    }
}
