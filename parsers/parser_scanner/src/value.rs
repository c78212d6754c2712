//! Parsed values
//!
//! The shape of a [`Value`] mirrors the scanner that produced it:
//! identities and literal tokens give a [`Value::Token`], packs, sequences
//! and lists give a [`Value::Seq`], and `either` gives a [`Value::Tagged`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tokenizer::is_single_token;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A single token
    Token(String),
    /// An ordered sequence of values
    Seq(Vec<Value>),
    /// The branch picked by an `either` scanner and its data
    Tagged {
        #[cfg_attr(feature = "serde", serde(rename = "type"))]
        kind: String,
        data: Box<Value>,
    },
}

impl Value {
    pub fn token(text: impl Into<String>) -> Self {
        Value::Token(text.into())
    }

    /// Builds a sequence of tokens
    pub fn tokens<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Seq(texts.into_iter().map(|t| Value::Token(t.into())).collect())
    }

    pub fn seq(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(values.into_iter().collect())
    }

    pub fn tagged(kind: impl Into<String>, data: Value) -> Self {
        Value::Tagged {
            kind: kind.into(),
            data: Box::new(data),
        }
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_tagged(&self) -> Option<(&str, &Value)> {
        match self {
            Value::Tagged { kind, data } => Some((kind, data)),
            _ => None,
        }
    }

    /// The token to write, which must read back as itself
    pub(crate) fn expect_token(&self) -> Result<&str> {
        let token = self.as_token().ok_or(Error::ExpectedToken)?;
        if !is_single_token(token) {
            return Err(Error::UnwritableToken(token.to_string()));
        }
        Ok(token)
    }

    pub(crate) fn expect_seq(&self) -> Result<&[Value]> {
        self.as_seq().ok_or(Error::ExpectedSequence)
    }

    pub(crate) fn expect_tagged(&self) -> Result<(&str, &Value)> {
        self.as_tagged().ok_or(Error::ExpectedTagged)
    }

    /// Mutable access to the `index`-th element of a sequence
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        match self {
            Value::Seq(values) => values.get_mut(index),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Token(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Token(text)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Token(text) => write!(f, "{}", text),
            Value::Seq(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Value::Tagged { kind, data } => write!(f, "{}({})", kind, data),
        }
    }
}
