//! # botcmd-syntax
//!
//! Typed positional argument signatures for chat-bot commands.
//!
//! ## Features
//!
//! - Signature grammar `name:type[?][...]` compiled with nom
//! - Closed set of argument types with a compile-time registry
//! - Runtime parser applying a compiled signature to whitespace-split tokens
//! - Structured `{kind, detail}` error payloads (serializable with `serde`)

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ```rust
//! use botcmd_syntax::{SyntaxParser, Value};
//!
//! let parser = SyntaxParser::new("target:user days:number? reason:string...").unwrap();
//! let args = parser.parse(&(), &(), &["<@42>", "7", "spamming", "links"]).unwrap();
//!
//! assert_eq!(args.str(0), Some("<@42>"));
//! assert_eq!(args.number(1), Some(7.0));
//! assert_eq!(args.tail(2).len(), 2);
//! assert!(matches!(args[3], Value::String(ref s) if s == "links"));
//! ```

pub mod error;
pub mod parser;
pub mod signature;
pub mod types;
pub mod value;

pub use self::error::{
    CompileError, ErrorDetail, ErrorKind, ErrorPayload, ParseError, Result, SyntaxError,
};
pub use self::parser::SyntaxParser;
pub use self::signature::{compile, CompiledSignature, SignatureDescriptor};
pub use self::types::{
    ArgumentParser, EntityKind, StringOptions, TypeKind, TypeOptions, TypeRegistry, DEFAULT_MAX_LENGTH,
    DEFAULT_MIN_LENGTH,
};
pub use self::value::{Arguments, EntityRef, Value};
