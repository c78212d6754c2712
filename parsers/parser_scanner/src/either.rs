//! Keyword selected alternatives

use std::collections::BTreeMap;

use log::trace;

use crate::error::{Error, Result};
use crate::scanner::{synthesize, Combinator, Scanner};
use crate::tokenizer::Tokenizer;
use crate::value::Value;

/// Reads a keyword, then the scanner registered for that keyword.
///
/// When a fix changes the keyword, the new branch is written from its fix
/// default instead of reusing the original tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Either {
    branches: BTreeMap<String, Scanner>,
    fix_defaults: BTreeMap<String, String>,
}

impl Either {
    pub fn new(branches: BTreeMap<String, Scanner>, fix_defaults: BTreeMap<String, String>) -> Self {
        Self { branches, fix_defaults }
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    fn branch(&self, keyword: &str) -> Result<&Scanner> {
        self.branches
            .get(keyword)
            .ok_or_else(|| Error::UnknownKeyword(keyword.to_string()))
    }
}

impl Combinator for Either {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        let keyword = tokenizer.next_non_whitespace().ok_or(Error::NoToken)?;
        let data = self.branch(keyword)?.process(tokenizer)?;
        Ok(Value::tagged(keyword, data))
    }

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String> {
        let (kind, data) = replacement.expect_tagged()?;

        let mut rebuilt = tokenizer.take_whitespace().to_string();
        let keyword = tokenizer.next_non_whitespace().ok_or(Error::NoToken)?;
        let original = self.branch(keyword)?;

        if keyword == kind {
            rebuilt.push_str(keyword);
            rebuilt.push_str(&original.fixing(tokenizer, data)?);
            return Ok(rebuilt);
        }

        let branch = self.branch(kind)?;
        let default = self
            .fix_defaults
            .get(kind)
            .ok_or_else(|| Error::MissingFixDefault(kind.to_string()))?;

        trace!("either switches from {} to {}", keyword, kind);
        original.process(tokenizer)?;
        rebuilt.push_str(kind);
        rebuilt.push_str(&synthesize(branch, default, data)?);
        Ok(rebuilt)
    }
}
