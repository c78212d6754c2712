//! Built-in schemas for known resource files

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use clap::ValueEnum;
use parser_scanner::Value;

use crate::schema::Schema;

/// Resource files with a built-in schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `textClient.inc`: `TID COLOR { IDS }` rows
    TextClient,
    /// `propItemEtc.inc`: piercing, set and random option records
    PropItemEtc,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::TextClient => "text-client",
            Format::PropItemEtc => "prop-item-etc",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Format::TextClient => text_client(),
            Format::PropItemEtc => prop_item_etc(),
        }
    }
}

fn text_client() -> Schema {
    Schema::list(Schema::Pack(5), None, None, Some("\nTID_NEW 0xffffffff { IDS_NEW }"))
}

fn prop_item_etc() -> Schema {
    let bonus_pairs = Schema::list(Schema::Pack(2), Some("{"), Some("}"), Some("\n    DST_NONE 0"));

    let set_blocks = Schema::list(
        Schema::either(
            [
                ("Elem", Schema::list(Schema::Pack(2), Some("{"), Some("}"), Some("\n        II_NONE PARTS_NONE"))),
                (
                    "Avail",
                    Schema::list(
                        Schema::Sequential(vec![Schema::Pack(2), Schema::Identity]),
                        Some("{"),
                        Some("}"),
                        Some("\n        DST_NONE 0 0"),
                    ),
                ),
            ],
            &[("Elem", " { }"), ("Avail", " { }")],
        ),
        Some("{"),
        Some("}"),
        Some("\n    Elem { }"),
    );

    Schema::list(
        Schema::either(
            [
                ("Piercing", Schema::Sequential(vec![Schema::Identity, bonus_pairs.clone()])),
                ("SetItem", Schema::Sequential(vec![Schema::Identity, Schema::Identity, set_blocks])),
                (
                    "RandomOptItem",
                    Schema::Sequential(vec![
                        Schema::Identity,
                        Schema::Identity,
                        Schema::Identity,
                        Schema::Identity,
                        bonus_pairs,
                    ]),
                ),
            ],
            &[],
        ),
        None,
        None,
        None,
    )
}

/// One row of `textClient.inc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextClientEntry {
    pub tid: String,
    pub color: String,
    pub ids: String,
}

/// Check the rows parsed by the `text-client` format and extract them
pub fn text_client_entries(value: &Value) -> Result<Vec<TextClientEntry>> {
    let Some(rows) = value.as_seq() else {
        bail!("Expected a list of rows, found {}", value);
    };

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let tokens: Option<Vec<&str>> = row
            .as_seq()
            .and_then(|items| items.iter().map(Value::as_token).collect());

        match tokens.as_deref() {
            Some([tid, color, "{", ids, "}"]) if ids.starts_with("IDS_") => {
                entries.push(TextClientEntry {
                    tid: tid.to_string(),
                    color: color.to_string(),
                    ids: ids.to_string(),
                });
            }
            _ => bail!("Unexpected text client row {}", row),
        }
    }
    Ok(entries)
}

/// Read a strings file: one `IDS_x text` pair per line, `//` comments ignored
pub fn read_strings(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .map(|line| match line.find([' ', '\t']) {
            Some(index) => (line[..index].to_string(), line[index + 1..].trim().to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

/// Map every TID to its text, falling back to the IDS when it has none
pub fn resolve_text_client(
    entries: &[TextClientEntry],
    strings: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|entry| {
            let text = strings.get(&entry.ids).unwrap_or(&entry.ids);
            (entry.tid.clone(), text.clone())
        })
        .collect()
}
