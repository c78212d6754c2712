//! The scanner tree and its parse / fix entry points

use std::collections::BTreeMap;

use crate::either::Either;
use crate::error::{Error, Result};
use crate::identity::{Identity, PreciseToken};
use crate::list::List;
use crate::pack::Pack;
use crate::sequential::Sequential;
use crate::tokenizer::{is_whitespace, Tokenizer};
use crate::value::Value;

/// Structural operations shared by every scanner.
///
/// `process` reads a value from the tokenizer. `fixing` reads the same
/// tokens from the tokenizer of the original text and returns the text
/// that, once processed, gives `replacement`. Neither checks that the
/// whole input was consumed; [`Scanner::parse`] and [`Scanner::fix`] do.
pub trait Combinator {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value>;

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String>;
}

/// A node of a scanner tree
#[derive(Debug, Clone, PartialEq)]
pub enum Scanner {
    Identity(Identity),
    PreciseToken(PreciseToken),
    Pack(Pack),
    Sequential(Sequential),
    List(List),
    Either(Either),
}

impl Scanner {
    /// Parses the whole `content`. Only whitespace may be left over.
    pub fn parse(&self, content: &str) -> Result<Value> {
        let mut tokenizer = Tokenizer::new(content);
        let value = self.process(&mut tokenizer)?;
        expect_exhausted(&mut tokenizer)?;
        Ok(value)
    }

    /// Rewrites `original` so that parsing the result gives `replacement`.
    ///
    /// Whitespace of the original is kept wherever the structure allows it,
    /// so `fix(s, parse(s)?)` gives back `s`.
    pub fn fix(&self, original: &str, replacement: &Value) -> Result<String> {
        let mut tokenizer = Tokenizer::new(original);
        let mut rebuilt = tokenizer.take_whitespace().to_string();
        rebuilt.push_str(&self.fixing(&mut tokenizer, replacement)?);
        rebuilt.push_str(tokenizer.take_whitespace());
        expect_exhausted(&mut tokenizer)?;
        Ok(rebuilt)
    }

    fn as_combinator(&self) -> &dyn Combinator {
        match self {
            Scanner::Identity(scanner) => scanner,
            Scanner::PreciseToken(scanner) => scanner,
            Scanner::Pack(scanner) => scanner,
            Scanner::Sequential(scanner) => scanner,
            Scanner::List(scanner) => scanner,
            Scanner::Either(scanner) => scanner,
        }
    }
}

impl Combinator for Scanner {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        self.as_combinator().process(tokenizer)
    }

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String> {
        self.as_combinator().fixing(tokenizer, replacement)
    }
}

fn expect_exhausted(tokenizer: &mut Tokenizer<'_>) -> Result<()> {
    match tokenizer.next_non_whitespace() {
        Some(token) => Err(Error::TrailingContent(token.to_string())),
        None => Ok(()),
    }
}

/// Writes `value` with `scanner` using `template` as the original text.
///
/// The result is spliced after existing content, so it gets a leading
/// space when the template does not start with whitespace.
pub(crate) fn synthesize(scanner: &Scanner, template: &str, value: &Value) -> Result<String> {
    let text = scanner.fix(template, value)?;
    if text.is_empty() || text.starts_with(is_whitespace) {
        Ok(text)
    } else {
        Ok(format!(" {}", text))
    }
}

/// One or several children of a [`sequential`] scanner.
///
/// Literal strings become [`PreciseToken`] scanners and groups are
/// flattened in order.
#[derive(Debug, Clone)]
pub enum Segment {
    One(Scanner),
    Group(Vec<Segment>),
}

impl Segment {
    fn flatten_into(self, children: &mut Vec<Scanner>) {
        match self {
            Segment::One(scanner) => children.push(scanner),
            Segment::Group(segments) => {
                for segment in segments {
                    segment.flatten_into(children);
                }
            }
        }
    }
}

impl From<Scanner> for Segment {
    fn from(scanner: Scanner) -> Self {
        Segment::One(scanner)
    }
}

impl From<&str> for Segment {
    fn from(literal: &str) -> Self {
        Segment::One(precise_token(literal))
    }
}

impl From<String> for Segment {
    fn from(literal: String) -> Self {
        Segment::One(precise_token(literal))
    }
}

impl<T: Into<Segment>> From<Vec<T>> for Segment {
    fn from(group: Vec<T>) -> Self {
        Segment::Group(group.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Segment>, const N: usize> From<[T; N]> for Segment {
    fn from(group: [T; N]) -> Self {
        Segment::Group(group.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Scanner {
    fn from(literal: &str) -> Self {
        precise_token(literal)
    }
}

/// Reads one token
pub fn identity() -> Scanner {
    Scanner::Identity(Identity)
}

/// Reads one token that must be `expected`
pub fn precise_token(expected: impl Into<String>) -> Scanner {
    Scanner::PreciseToken(PreciseToken::new(expected))
}

/// Reads the next `quantity` tokens
pub fn pack(quantity: usize) -> Scanner {
    Scanner::Pack(Pack::new(quantity))
}

/// Reads each child in order.
///
/// ```
/// use parser_scanner::{identity, sequential, Value};
///
/// let scanner = sequential![identity(), "is", identity()];
/// let value = scanner.parse("toto is young").unwrap();
/// assert_eq!(value, Value::tokens(["toto", "is", "young"]));
/// ```
pub fn sequential<I>(children: I) -> Scanner
where
    I: IntoIterator,
    I::Item: Into<Segment>,
{
    let mut flat = Vec::new();
    for child in children {
        child.into().flatten_into(&mut flat);
    }
    Scanner::Sequential(Sequential::new(flat))
}

/// Reads `element` until `end`, or until the end of the input when `end`
/// is `None`. `fix_template` is the text new elements are written from.
pub fn list(
    element: Scanner,
    begin: Option<&str>,
    end: Option<&str>,
    fix_template: Option<&str>,
) -> Scanner {
    Scanner::List(List::new(element, begin, end, fix_template))
}

/// Reads a keyword and then the scanner registered for it.
///
/// `fix_defaults` gives, per keyword, the text a branch is written from
/// when a fix changes the keyword.
pub fn either<K, I>(branches: I, fix_defaults: &[(&str, &str)]) -> Scanner
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Scanner)>,
{
    let branches: BTreeMap<String, Scanner> = branches
        .into_iter()
        .map(|(keyword, scanner)| (keyword.into(), scanner))
        .collect();
    let fix_defaults = fix_defaults
        .iter()
        .map(|(keyword, text)| (keyword.to_string(), text.to_string()))
        .collect();
    Scanner::Either(Either::new(branches, fix_defaults))
}

/// Shorthand for `list(either(branches, fix_defaults), begin, end, fix_template)`
pub fn list_either<K, I>(
    begin: Option<&str>,
    branches: I,
    end: Option<&str>,
    fix_template: Option<&str>,
    fix_defaults: &[(&str, &str)],
) -> Scanner
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Scanner)>,
{
    list(either(branches, fix_defaults), begin, end, fix_template)
}

/// Builds a [`sequential`] scanner, promoting string literals to tokens.
///
/// ```
/// use parser_scanner::{identity, pack, sequential};
///
/// let scanner = sequential![pack(2), "=", identity()];
/// assert!(scanner.parse("a b = c").is_ok());
/// ```
#[macro_export]
macro_rules! sequential {
    ($($child:expr),* $(,)?) => {{
        let children: ::std::vec::Vec<$crate::Segment> =
            ::std::vec![$($crate::Segment::from($child)),*];
        $crate::sequential(children)
    }};
}
