//! Declarative scanners for whitespace-delimited resource files
//!
//! A scanner is built once by composing a few primitives and then used to
//! both read a text into a [`Value`] and write an edited [`Value`] back into
//! the original text, keeping the formatting of everything that did not
//! change:
//! - [`identity`] reads one token
//! - [`precise_token`] reads one expected token (string literals in
//!   [`sequential!`] are promoted to it)
//! - [`pack`] reads a fixed number of tokens
//! - [`sequential`] reads a fixed list of scanners
//! - [`list`] reads a variable number of elements, optionally bracketed
//! - [`either`] reads a keyword and the scanner registered for it
//!
//! # Examples
//!
//! ```rust
//! use parser_scanner::{identity, list, pack, sequential, Value};
//!
//! let scanner = sequential![identity(), "=", list(pack(2), Some("{"), Some("}"), Some(" 0 0"))];
//! let original = "bonus  =  {\n  DST_STR 10\n}";
//!
//! let mut value = scanner.parse(original).unwrap();
//! *value.get_mut(2).unwrap() = Value::seq([
//!     Value::tokens(["DST_STR", "12"]),
//!     Value::tokens(["DST_DEX", "3"]),
//! ]);
//!
//! let fixed = scanner.fix(original, &value).unwrap();
//! assert_eq!(fixed, "bonus  =  {\n  DST_STR 12 DST_DEX 3\n}");
//! assert_eq!(scanner.parse(&fixed).unwrap(), value);
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - Enables serialization/deserialization of [`Value`] (enabled by default)

mod either;
mod error;
mod identity;
mod list;
mod pack;
mod scanner;
mod sequential;
pub mod tokenizer;
mod value;

pub use either::Either;
pub use error::{Error, Result};
pub use identity::{Identity, PreciseToken};
pub use list::List;
pub use pack::Pack;
pub use scanner::{
    either, identity, list, list_either, pack, precise_token, sequential, Combinator, Scanner,
    Segment,
};
pub use sequential::Sequential;
pub use tokenizer::{Token, TokenKind, Tokenizer};
pub use value::Value;
