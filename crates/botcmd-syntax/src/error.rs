//! Error types for signature compilation and argument parsing.
//!
//! Two audiences, two kinds:
//! - [`ParseError`] is user-facing. It describes why a token stream does not
//!   fit a command's signature and is meant to be rendered as a usage hint.
//! - [`CompileError`] is developer-facing. It describes a malformed signature
//!   string and should abort registration.
//!
//! [`SyntaxError`] wraps both and exposes the structured payload handed to
//! the dispatch layer.

use crate::signature::SignatureDescriptor;
use crate::types::TypeKind;
use thiserror::Error;

/// Convenience type alias for Results using [`SyntaxError`].
pub type Result<T, E = SyntaxError> = std::result::Result<T, E>;

/// Errors raised while applying a signature to a token stream.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A required argument has no token at its position.
    #[error("missing required argument {descriptor} at position {index}")]
    MissingArgument {
        /// Position of the unmet descriptor.
        index: usize,
        /// The descriptor that was not satisfied.
        descriptor: SignatureDescriptor,
    },

    /// More tokens than the signature can take.
    #[error("unexpected argument `{token}` at position {index}")]
    UnexpectedArgument {
        /// Position of the first unconsumed token.
        index: usize,
        /// The first unconsumed token.
        token: String,
    },

    /// A token does not follow the lexical rules of its type.
    #[error("argument {index} (`{token}`) is not a valid {expected}")]
    InvalidToken {
        /// Position of the offending token.
        index: usize,
        /// The offending token.
        token: String,
        /// Type the token was bound to.
        expected: TypeKind,
    },

    /// A string token is shorter than the configured minimum.
    #[error("argument {index} is too short (minimum {min} characters)")]
    TooShort {
        /// Position of the offending token.
        index: usize,
        /// The offending token.
        token: String,
        /// Minimum accepted length.
        min: usize,
    },

    /// A string token is longer than the configured maximum.
    #[error("argument {index} is too long (maximum {max} characters)")]
    TooLong {
        /// Position of the offending token.
        index: usize,
        /// The offending token.
        token: String,
        /// Maximum accepted length.
        max: usize,
    },
}

impl ParseError {
    /// Token position the error refers to.
    pub fn index(&self) -> usize {
        match self {
            Self::MissingArgument { index, .. }
            | Self::UnexpectedArgument { index, .. }
            | Self::InvalidToken { index, .. }
            | Self::TooShort { index, .. }
            | Self::TooLong { index, .. } => *index,
        }
    }

    /// The raw token at fault, if the error is about a present token.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { .. } => None,
            Self::UnexpectedArgument { token, .. }
            | Self::InvalidToken { token, .. }
            | Self::TooShort { token, .. }
            | Self::TooLong { token, .. } => Some(token),
        }
    }
}

/// Errors raised while compiling a signature string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The token does not match `name:type[?][...]` as a whole.
    #[error("invalid syntax string: `{0}`")]
    InvalidSyntaxString(String),

    /// No argument name could be extracted.
    #[error("invalid type name: `{0}`")]
    InvalidTypeName(String),

    /// No registered type keyword could be extracted.
    #[error("invalid type: `{0}`")]
    InvalidType(String),

    /// The requested feature exists only as an extension point.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl CompileError {
    /// Short message naming the check that failed.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidSyntaxString(_) => "invalid syntax string",
            Self::InvalidTypeName(_) => "invalid type name",
            Self::InvalidType(_) => "invalid type",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

/// Discriminant of the structured error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// End-user input did not fit the signature.
    #[cfg_attr(feature = "serde", serde(rename = "PARSE_ERROR"))]
    Parse,
    /// A signature could not be compiled.
    #[cfg_attr(feature = "serde", serde(rename = "INTERNAL_ERROR"))]
    Internal,
}

impl ErrorKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "PARSE_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detail section of [`ErrorPayload`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ErrorDetail {
    /// Arity failure: the descriptor that had no token.
    Missing {
        /// Position of the descriptor.
        index: usize,
        /// The unmet descriptor.
        descriptor: SignatureDescriptor,
    },
    /// Failure tied to a raw token.
    Token {
        /// Position of the token.
        index: usize,
        /// The raw token.
        token: String,
    },
    /// Compilation failure.
    Message {
        /// Which compilation check failed.
        message: &'static str,
        /// Offending signature or feature.
        subject: String,
    },
}

/// Structured `{kind, detail}` error payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorPayload {
    /// Error kind.
    pub kind: ErrorKind,
    /// Kind-specific detail.
    pub detail: ErrorDetail,
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// User input did not fit the signature.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A signature could not be compiled.
    #[error(transparent)]
    Internal(#[from] CompileError),
}

impl SyntaxError {
    /// Payload kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(ParseError::MissingArgument { .. }) => "missing_argument",
            Self::Parse(ParseError::UnexpectedArgument { .. }) => "unexpected_argument",
            Self::Parse(ParseError::InvalidToken { .. }) => "invalid_token",
            Self::Parse(ParseError::TooShort { .. }) => "too_short",
            Self::Parse(ParseError::TooLong { .. }) => "too_long",
            Self::Internal(CompileError::InvalidSyntaxString(_)) => "invalid_syntax_string",
            Self::Internal(CompileError::InvalidTypeName(_)) => "invalid_type_name",
            Self::Internal(CompileError::InvalidType(_)) => "invalid_type",
            Self::Internal(CompileError::Unsupported(_)) => "unsupported",
        }
    }

    /// Build the structured `{kind, detail}` payload.
    pub fn payload(&self) -> ErrorPayload {
        let detail = match self {
            Self::Parse(ParseError::MissingArgument { index, descriptor }) => ErrorDetail::Missing {
                index: *index,
                descriptor: descriptor.clone(),
            },
            Self::Parse(err) => ErrorDetail::Token {
                index: err.index(),
                token: err.token().unwrap_or_default().to_owned(),
            },
            Self::Internal(err) => ErrorDetail::Message {
                message: err.message(),
                subject: match err {
                    CompileError::InvalidSyntaxString(s)
                    | CompileError::InvalidTypeName(s)
                    | CompileError::InvalidType(s) => s.clone(),
                    CompileError::Unsupported(feature) => (*feature).to_owned(),
                },
            },
        };
        ErrorPayload {
            kind: self.kind(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SyntaxError::from(ParseError::UnexpectedArgument {
            index: 2,
            token: "x".into(),
        });
        assert_eq!(err.error_code(), "unexpected_argument");
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = SyntaxError::from(CompileError::InvalidType("a:foo".into()));
        assert_eq!(err.error_code(), "invalid_type");
        assert_eq!(err.kind().as_str(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_payload_carries_token_and_index() {
        let err = SyntaxError::from(ParseError::InvalidToken {
            index: 1,
            token: "abc".into(),
            expected: TypeKind::Number,
        });
        let payload = err.payload();
        assert_eq!(payload.kind, ErrorKind::Parse);
        assert_eq!(
            payload.detail,
            ErrorDetail::Token {
                index: 1,
                token: "abc".into()
            }
        );
    }

    #[test]
    fn test_payload_names_failed_check() {
        let err = SyntaxError::from(CompileError::InvalidSyntaxString("a:foobar".into()));
        match err.payload().detail {
            ErrorDetail::Message { message, subject } => {
                assert_eq!(message, "invalid syntax string");
                assert_eq!(subject, "a:foobar");
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }
}
