//! JSON descriptions of scanner trees

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use parser_scanner::{either, identity, list, pack, precise_token, sequential, Scanner};
use serde::{Deserialize, Serialize};

/// A scanner tree as it is written in a schema file.
///
/// ```json
/// {"list": {"element": {"sequential": ["identity", {"token": "="}, {"pack": 2}]}}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    Identity,
    Token(String),
    Pack(usize),
    Sequential(Vec<Schema>),
    List(ListSchema),
    Either(EitherSchema),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListSchema {
    pub element: Box<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EitherSchema {
    pub branches: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fix_defaults: BTreeMap<String, String>,
}

impl Schema {
    /// Read a schema from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema {}", path.display()))?;
        let schema = Self::from_json(&content)
            .with_context(|| format!("Invalid schema {}", path.display()))?;
        debug!("Loaded schema from {}", path.display());
        Ok(schema)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the scanner this schema describes
    pub fn build(&self) -> Scanner {
        match self {
            Schema::Identity => identity(),
            Schema::Token(expected) => precise_token(expected.as_str()),
            Schema::Pack(quantity) => pack(*quantity),
            Schema::Sequential(children) => sequential(children.iter().map(Schema::build)),
            Schema::List(schema) => list(
                schema.element.build(),
                schema.begin.as_deref(),
                schema.end.as_deref(),
                schema.fix_template.as_deref(),
            ),
            Schema::Either(schema) => {
                let fix_defaults: Vec<(&str, &str)> = schema
                    .fix_defaults
                    .iter()
                    .map(|(keyword, text)| (keyword.as_str(), text.as_str()))
                    .collect();
                either(
                    schema
                        .branches
                        .iter()
                        .map(|(keyword, branch)| (keyword.as_str(), branch.build())),
                    &fix_defaults,
                )
            }
        }
    }

    pub fn list(element: Schema, begin: Option<&str>, end: Option<&str>, fix_template: Option<&str>) -> Self {
        Schema::List(ListSchema {
            element: Box::new(element),
            begin: begin.map(str::to_string),
            end: end.map(str::to_string),
            fix_template: fix_template.map(str::to_string),
        })
    }

    pub fn either<I>(branches: I, fix_defaults: &[(&str, &str)]) -> Self
    where
        I: IntoIterator<Item = (&'static str, Schema)>,
    {
        Schema::Either(EitherSchema {
            branches: branches
                .into_iter()
                .map(|(keyword, branch)| (keyword.to_string(), branch))
                .collect(),
            fix_defaults: fix_defaults
                .iter()
                .map(|(keyword, text)| (keyword.to_string(), text.to_string()))
                .collect(),
        })
    }
}
