//! Errors raised while scanning or fixing resource text

/// Error type for scanning and fixing operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // Structural errors: the text does not match the scanner
    #[error("no token found but expected one")]
    NoToken,
    #[error("pack only found {found} / {expected} tokens")]
    NotEnoughTokens { found: usize, expected: usize },
    #[error("expected `{expected}` but found {}", describe(.found))]
    UnexpectedToken { expected: String, found: Option<String> },
    #[error("list doesn't start with `{expected}`, found {}", describe(.found))]
    MissingBegin { expected: String, found: Option<String> },
    #[error("unexpected end of input in list, expected `{end}`")]
    UnterminatedList { end: String },
    #[error("unknown keyword `{0}`")]
    UnknownKeyword(String),
    #[error("not everything was consumed, found `{0}`")]
    TrailingContent(String),
    #[error("list element at byte {offset} consumed no token")]
    EmptyElement { offset: usize },

    // Contract violations: the replacement cannot be written with this scanner
    #[error("replacement is not a token")]
    ExpectedToken,
    #[error("replacement is not a sequence")]
    ExpectedSequence,
    #[error("replacement element {index} is not a token")]
    NonTokenElement { index: usize },
    #[error("replacement has {found} elements but {expected} are required")]
    WrongLength { expected: usize, found: usize },
    #[error("replacement is not a tagged value")]
    ExpectedTagged,
    #[error("token `{expected}` cannot be changed into `{found}`")]
    ImmutableToken { expected: String, found: String },
    #[error("list has no fix template to write new elements")]
    MissingFixTemplate,
    #[error("no fix default to write a `{0}` branch")]
    MissingFixDefault(String),
    #[error("`{0}` cannot be written back as a single token")]
    UnwritableToken(String),
}

impl Error {
    /// True when the replacement value was the problem, not the original text
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::ExpectedToken
                | Error::ExpectedSequence
                | Error::NonTokenElement { .. }
                | Error::WrongLength { .. }
                | Error::ExpectedTagged
                | Error::ImmutableToken { .. }
                | Error::MissingFixTemplate
                | Error::MissingFixDefault(_)
                | Error::UnwritableToken(_)
        )
    }
}

fn describe(found: &Option<String>) -> String {
    match found {
        Some(token) => format!("`{token}`"),
        None => "end of input".to_string(),
    }
}

/// Result type for scanning operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::UnexpectedToken {
            expected: "is".to_string(),
            found: Some("has".to_string()),
        };
        assert_eq!(err.to_string(), "expected `is` but found `has`");

        let err = Error::MissingBegin {
            expected: "{".to_string(),
            found: None,
        };
        assert_eq!(err.to_string(), "list doesn't start with `{`, found end of input");

        let err = Error::NotEnoughTokens { found: 1, expected: 3 };
        assert_eq!(err.to_string(), "pack only found 1 / 3 tokens");
    }

    #[test]
    fn test_contract_violation_split() {
        assert!(Error::MissingFixTemplate.is_contract_violation());
        assert!(Error::WrongLength { expected: 2, found: 3 }.is_contract_violation());
        assert!(!Error::NoToken.is_contract_violation());
        assert!(!Error::TrailingContent("x".into()).is_contract_violation());
        assert!(!Error::EmptyElement { offset: 0 }.is_contract_violation());
        assert!(Error::UnwritableToken("a b".into()).is_contract_violation());
    }
}
