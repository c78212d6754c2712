use crate::error::{Error, Result};
use crate::scanner::Combinator;
use crate::tokenizer::{is_single_token, Tokenizer};
use crate::value::Value;

/// Reads a fixed number of tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pack {
    quantity: usize,
}

impl Pack {
    pub fn new(quantity: usize) -> Self {
        Self { quantity }
    }

    pub fn quantity(&self) -> usize {
        self.quantity
    }

    fn check_replacement<'v>(&self, replacement: &'v Value) -> Result<Vec<&'v str>> {
        let values = replacement.expect_seq()?;
        let tokens = values
            .iter()
            .enumerate()
            .map(|(index, value)| match value.as_token() {
                Some(token) if is_single_token(token) => Ok(token),
                Some(token) => Err(Error::UnwritableToken(token.to_string())),
                None => Err(Error::NonTokenElement { index }),
            })
            .collect::<Result<Vec<_>>>()?;

        if tokens.len() != self.quantity {
            return Err(Error::WrongLength {
                expected: self.quantity,
                found: tokens.len(),
            });
        }
        Ok(tokens)
    }
}

impl Combinator for Pack {
    fn process(&self, tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
        let mut tokens = Vec::with_capacity(self.quantity);
        while tokens.len() < self.quantity {
            match tokenizer.next_non_whitespace() {
                Some(token) => tokens.push(Value::token(token)),
                None => {
                    return Err(Error::NotEnoughTokens {
                        found: tokens.len(),
                        expected: self.quantity,
                    })
                }
            }
        }
        Ok(Value::Seq(tokens))
    }

    fn fixing(&self, tokenizer: &mut Tokenizer<'_>, replacement: &Value) -> Result<String> {
        let replacements = self.check_replacement(replacement)?;

        let mut rebuilt = String::new();
        let mut substituted = 0;
        while substituted < self.quantity {
            let token = tokenizer.next_token().ok_or(Error::NotEnoughTokens {
                found: substituted,
                expected: self.quantity,
            })?;

            if token.is_whitespace() {
                rebuilt.push_str(token.text);
            } else {
                rebuilt.push_str(replacements[substituted]);
                substituted += 1;
            }
        }
        Ok(rebuilt)
    }
}

#[cfg(test)]
mod tests {
    use crate::{pack, Error, Value};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pack_parse() {
        assert_eq!(pack(1).parse("first"), Ok(Value::tokens(["first"])));
        assert_eq!(
            pack(4).parse(" 1 2\n3\t4 "),
            Ok(Value::tokens(["1", "2", "3", "4"]))
        );
        assert_eq!(pack(0).parse("  "), Ok(Value::Seq(vec![])));
    }

    #[test]
    fn test_pack_not_enough_tokens() {
        assert_eq!(
            pack(3).parse("1 2"),
            Err(Error::NotEnoughTokens { found: 2, expected: 3 })
        );
        assert!(pack(2).parse("1 2 3").is_err());
    }

    #[test]
    fn test_pack_fix() {
        let scanner = pack(3);
        assert_eq!(
            scanner.fix(" a  b\nc ", &Value::tokens(["x", "yy", "z"])).unwrap(),
            " x  yy\nz "
        );
    }

    #[test]
    fn test_pack_fix_contract() {
        let scanner = pack(2);
        assert_eq!(scanner.fix("a b", &Value::token("a")), Err(Error::ExpectedSequence));
        assert_eq!(
            scanner.fix("a b", &Value::seq([Value::token("a"), Value::tokens(["b"])])),
            Err(Error::NonTokenElement { index: 1 })
        );
        assert_eq!(
            scanner.fix("a b", &Value::tokens(["a", "b", "c"])),
            Err(Error::WrongLength { expected: 2, found: 3 })
        );
        assert_eq!(
            scanner.fix("a", &Value::tokens(["a", "b"])),
            Err(Error::NotEnoughTokens { found: 1, expected: 2 })
        );
    }

    #[test]
    fn test_pack_fix_rejects_tokens_that_do_not_read_back() {
        let scanner = pack(2);
        assert_eq!(
            scanner.fix("a b", &Value::tokens(["x y", "z"])),
            Err(Error::UnwritableToken("x y".into()))
        );
        assert_eq!(
            scanner.fix("a b", &Value::tokens(["x", ""])),
            Err(Error::UnwritableToken("".into()))
        );
        assert_eq!(
            scanner.fix("a b", &Value::tokens(["\"x y\"", "z"])).unwrap(),
            "\"x y\" z"
        );
    }
}
