use crate::error::{Error, Result};
use crate::scanner::{Combinator, Scanner};
use crate::tokenizer::Tokenizer;
use crate::value::Value;

/// Reads a fixed list of scanners, one after the other
#[derive(Debug, Clone, PartialEq)]
pub struct Sequential {
    children: Vec<Scanner>,
}

impl Sequential {
    pub fn new(children: Vec<Scanner>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Scanner] {
        &self.children
    }
}

impl Combinator for Sequential {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        self.children
            .iter()
            .map(|child| child.process(tokenizer))
            .collect::<Result<Vec<_>>>()
            .map(Value::Seq)
    }

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String> {
        let replacements = replacement.expect_seq()?;
        if replacements.len() != self.children.len() {
            return Err(Error::WrongLength {
                expected: self.children.len(),
                found: replacements.len(),
            });
        }

        let mut rebuilt = String::new();
        for (child, replacement) in self.children.iter().zip(replacements) {
            rebuilt.push_str(&child.fixing(tokenizer, replacement)?);
        }
        Ok(rebuilt)
    }
}
