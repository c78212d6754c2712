//! Variable length lists of a single kind of element

use log::trace;

use crate::error::{Error, Result};
use crate::scanner::{synthesize, Combinator, Scanner};
use crate::tokenizer::Tokenizer;
use crate::value::Value;

/// Reads `element` repeatedly, optionally between a begin and an end symbol.
///
/// Without an end symbol the list runs to the end of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: Box<Scanner>,
    begin: Option<String>,
    end: Option<String>,
    fix_template: Option<String>,
}

impl List {
    pub fn new(
        element: Scanner,
        begin: Option<&str>,
        end: Option<&str>,
        fix_template: Option<&str>,
    ) -> Self {
        Self {
            element: Box::new(element),
            begin: begin.map(str::to_string),
            end: end.map(str::to_string),
            fix_template: fix_template.map(str::to_string),
        }
    }

    pub fn element(&self) -> &Scanner {
        &self.element
    }

    fn read_begin(&self, tokenizer: &mut Tokenizer<'_>) -> Result<()> {
        let Some(begin) = &self.begin else {
            return Ok(());
        };
        match tokenizer.next_non_whitespace() {
            Some(token) if token == begin => Ok(()),
            found => Err(Error::MissingBegin {
                expected: begin.clone(),
                found: found.map(str::to_string),
            }),
        }
    }

    /// Whether the next token starts an element. Whitespace must have been
    /// consumed already.
    fn at_element(&self, tokenizer: &Tokenizer<'_>) -> bool {
        match tokenizer.peek() {
            Some(token) => !token.is_whitespace() && Some(token.text) != self.end.as_deref(),
            None => false,
        }
    }

    /// Reads one element, which must consume at least one token
    fn process_element(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        let offset = tokenizer.cursor();
        let value = self.element.process(tokenizer)?;
        if tokenizer.cursor() == offset {
            return Err(Error::EmptyElement { offset });
        }
        Ok(value)
    }

    /// A written element must not start with the end symbol
    fn check_written(&self, text: &str) -> Result<()> {
        match &self.end {
            Some(end) if Tokenizer::new(text).next_non_whitespace() == Some(end.as_str()) => {
                Err(Error::UnwritableToken(end.clone()))
            }
            _ => Ok(()),
        }
    }

    fn read_end(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Option<String>> {
        let Some(end) = &self.end else {
            return Ok(None);
        };
        match tokenizer.next_non_whitespace() {
            Some(_) => Ok(Some(end.clone())),
            None => Err(Error::UnterminatedList { end: end.clone() }),
        }
    }
}

impl Combinator for List {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        self.read_begin(tokenizer)?;

        let mut elements = Vec::new();
        loop {
            tokenizer.take_whitespace();
            if !self.at_element(tokenizer) {
                break;
            }
            elements.push(self.process_element(tokenizer)?);
        }

        self.read_end(tokenizer)?;
        Ok(Value::Seq(elements))
    }

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String> {
        let replacements = replacement.expect_seq()?;

        let mut rebuilt = String::new();
        if let Some(begin) = &self.begin {
            rebuilt.push_str(tokenizer.take_whitespace());
            self.read_begin(tokenizer)?;
            rebuilt.push_str(begin);
        }

        // Whitespace that has to stay in front of the end symbol
        let mut closing = String::new();

        for (index, replacement) in replacements.iter().enumerate() {
            let whitespace = tokenizer.take_whitespace();
            let written = if self.at_element(tokenizer) {
                rebuilt.push_str(whitespace);
                self.element.fixing(tokenizer, replacement)?
            } else {
                closing.push_str(whitespace);
                let template = self
                    .fix_template
                    .as_deref()
                    .ok_or(Error::MissingFixTemplate)?;
                trace!("list grows to {} elements", index + 1);
                synthesize(&self.element, template, replacement)?
            };
            self.check_written(&written)?;
            rebuilt.push_str(&written);
        }

        loop {
            let whitespace = tokenizer.take_whitespace();
            if !self.at_element(tokenizer) {
                closing.push_str(whitespace);
                break;
            }
            trace!("list drops an element at offset {}", tokenizer.cursor());
            self.process_element(tokenizer)?;
        }

        rebuilt.push_str(&closing);
        if let Some(end) = self.read_end(tokenizer)? {
            rebuilt.push_str(&end);
        }
        Ok(rebuilt)
    }
}
