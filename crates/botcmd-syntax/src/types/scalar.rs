//! `boolean` and `number` argument types.

use super::TypeKind;
use crate::error::ParseError;
use crate::value::Value;

/// Parser for `true` / `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanType {
    name: String,
}

impl BooleanType {
    /// Create a boolean parser for argument `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepts exactly `true` or `false`.
    pub fn parse(&self, token: &str, index: usize) -> Result<Value, ParseError> {
        token
            .parse::<bool>()
            .map(Value::Boolean)
            .map_err(|_| ParseError::InvalidToken {
                index,
                token: token.to_owned(),
                expected: TypeKind::Boolean,
            })
    }
}

/// Parser for finite decimal numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberType {
    name: String,
}

impl NumberType {
    /// Create a number parser for argument `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepts any finite `f64` literal; `inf` and `NaN` are rejected.
    pub fn parse(&self, token: &str, index: usize) -> Result<Value, ParseError> {
        match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Number(n)),
            _ => Err(ParseError::InvalidToken {
                index,
                token: token.to_owned(),
                expected: TypeKind::Number,
            }),
        }
    }
}
