//! Single token scanners

use crate::error::{Error, Result};
use crate::scanner::Combinator;
use crate::tokenizer::Tokenizer;
use crate::value::Value;

/// Reads any single token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Combinator for Identity {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        tokenizer
            .next_non_whitespace()
            .map(Value::token)
            .ok_or(Error::NoToken)
    }

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String> {
        let replacement = replacement.expect_token()?;

        let mut rebuilt = tokenizer.take_whitespace().to_string();
        // The original token is dropped, only its position matters
        tokenizer.next_non_whitespace().ok_or(Error::NoToken)?;
        rebuilt.push_str(replacement);
        Ok(rebuilt)
    }
}

/// Reads a token that must be equal to a fixed literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreciseToken {
    expected: String,
}

impl PreciseToken {
    pub fn new(expected: impl Into<String>) -> Self {
        Self { expected: expected.into() }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    fn read<'a>(&self, tokenizer: &mut Tokenizer<'a>) -> Result<&'a str> {
        match tokenizer.next_non_whitespace() {
            Some(token) if token == self.expected => Ok(token),
            found => Err(Error::UnexpectedToken {
                expected: self.expected.clone(),
                found: found.map(str::to_string),
            }),
        }
    }
}

impl Combinator for PreciseToken {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        self.read(tokenizer).map(Value::token)
    }

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String> {
        let replacement = replacement.expect_token()?;
        if replacement != self.expected {
            return Err(Error::ImmutableToken {
                expected: self.expected.clone(),
                found: replacement.to_string(),
            });
        }

        let mut rebuilt = tokenizer.take_whitespace().to_string();
        rebuilt.push_str(self.read(tokenizer)?);
        Ok(rebuilt)
    }
}
