//! Lossless tokenizer for whitespace-delimited resource text
//!
//! The input is split into alternating whitespace and content tokens.
//! A content token runs until the next whitespace character, except that
//! whitespace between double quotes belongs to the token. Concatenating the
//! text of every token gives back the input unchanged.

use nom::{
    IResult,
    Parser,
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, none_of},
    combinator::{map, opt, recognize},
    error::Error,
    multi::many1_count,
};

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    Content,
}

/// A slice of the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Whether `text` reads back as exactly one content token
pub(crate) fn is_single_token(text: &str) -> bool {
    let mut tokenizer = Tokenizer::new(text);
    matches!(tokenizer.next_token(), Some(token) if !token.is_whitespace()) && tokenizer.is_exhausted()
}

fn whitespace_run(input: &str) -> IResult<&str, &str> {
    take_while1(is_whitespace).parse(input)
}

/// A quoted span, quotes included. An unterminated quote runs to the end.
fn quoted_span(input: &str) -> IResult<&str, &str> {
    recognize((
        char::<&str, Error<&str>>('"'),
        take_till(|c: char| c == '"'),
        opt(char::<&str, Error<&str>>('"')),
    ))
    .parse(input)
}

fn content_run(input: &str) -> IResult<&str, &str> {
    recognize(many1_count(alt((
        quoted_span,
        recognize(none_of::<&str, &str, Error<&str>>(" \t\r\n\"")),
    ))))
    .parse(input)
}

fn lexeme(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(whitespace_run, |text| Token { kind: TokenKind::Whitespace, text }),
        map(content_run, |text| Token { kind: TokenKind::Content, text }),
    ))
    .parse(input)
}

/// Cursor over the tokens of a string
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    content: &'a str,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content, cursor: 0 }
    }

    /// Byte offset of the next token
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text that has not been consumed yet
    pub fn remaining(&self) -> &'a str {
        &self.content[self.cursor..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.content.len()
    }

    /// Returns the token `next_token` would return, without consuming it
    pub fn peek(&self) -> Option<Token<'a>> {
        self.lex().map(|(token, _)| token)
    }

    /// Consumes and returns the next token, `None` at the end of the input
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let (token, end) = self.lex()?;
        self.cursor = end;
        Some(token)
    }

    /// Skips whitespace and returns the next content token
    pub fn next_non_whitespace(&mut self) -> Option<&'a str> {
        while let Some(token) = self.next_token() {
            if !token.is_whitespace() {
                return Some(token.text);
            }
        }
        None
    }

    /// Consumes the whitespace at the cursor, if any, and returns it
    pub fn take_whitespace(&mut self) -> &'a str {
        match self.peek() {
            Some(token) if token.is_whitespace() => {
                self.cursor += token.text.len();
                token.text
            }
            _ => "",
        }
    }

    fn lex(&self) -> Option<(Token<'a>, usize)> {
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }
        // Every non-empty input starts with either a whitespace or a content run
        let (after, token) = lexeme(rest).ok()?;
        Some((token, self.content.len() - after.len()))
    }
}
