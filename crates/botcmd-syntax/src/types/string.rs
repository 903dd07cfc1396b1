//! `string` argument type.

use crate::error::ParseError;
use crate::value::Value;

/// Default minimum string length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 0;

/// Default maximum string length, in characters (one chat message).
pub const DEFAULT_MAX_LENGTH: usize = 2000;

/// Length bounds for `string` arguments, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringOptions {
    /// Shortest accepted token.
    pub min_length: usize,
    /// Longest accepted token.
    pub max_length: usize,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Parser for free-text arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringType {
    name: String,
    options: StringOptions,
}

impl StringType {
    /// Create a string parser for argument `name`.
    pub fn new(name: impl Into<String>, options: StringOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured bounds.
    pub fn options(&self) -> StringOptions {
        self.options
    }

    /// Return the token unchanged if its length is within bounds.
    pub fn parse(&self, token: &str, index: usize) -> Result<Value, ParseError> {
        let len = token.chars().count();
        if len < self.options.min_length {
            return Err(ParseError::TooShort {
                index,
                token: token.to_owned(),
                min: self.options.min_length,
            });
        }
        if len > self.options.max_length {
            return Err(ParseError::TooLong {
                index,
                token: token.to_owned(),
                max: self.options.max_length,
            });
        }
        Ok(Value::String(token.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(min: usize, max: usize) -> StringType {
        StringType::new(
            "text",
            StringOptions {
                min_length: min,
                max_length: max,
            },
        )
    }

    #[test]
    fn returns_token_unchanged() {
        let value = StringType::new("text", StringOptions::default())
            .parse("hello", 0)
            .unwrap();
        assert_eq!(value, Value::String("hello".into()));
    }

    #[test]
    fn rejects_short_tokens() {
        let err = bounded(3, 10).parse("ab", 2).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooShort {
                index: 2,
                token: "ab".into(),
                min: 3
            }
        );
    }

    #[test]
    fn rejects_long_tokens() {
        let err = bounded(0, 4).parse("abcde", 0).unwrap_err();
        assert!(matches!(err, ParseError::TooLong { max: 4, .. }));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // four characters, eight bytes
        assert!(bounded(0, 4).parse("ñañá", 0).is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        let parser = bounded(2, 3);
        assert!(parser.parse("ab", 0).is_ok());
        assert!(parser.parse("abc", 0).is_ok());
    }
}
