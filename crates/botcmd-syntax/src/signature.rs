//! Signature compiler.
//!
//! A signature token has the form:
//!
//! ```text
//! <name>:<type>[?][...]
//! ```
//!
//! `name` is one or more ASCII letters, `type` is a keyword registered in
//! [`TypeRegistry::standard`], `?` marks the argument optional and `...`
//! makes it capture every remaining token. The markers, when present, appear
//! in that order and nothing may follow them.

use crate::error::CompileError;
use crate::types::{ArgumentParser, TypeKind, TypeOptions, TypeRegistry};
use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{all_consuming, opt},
    error::ErrorKind,
    sequence::{terminated, tuple},
    IResult,
};
use std::fmt;
use std::str::FromStr;

/// Compiled form of one positional argument slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SignatureDescriptor {
    /// Argument name.
    pub name: String,
    /// Argument type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TypeKind,
    /// The argument may be omitted.
    pub optional: bool,
    /// The argument captures all remaining tokens.
    pub rest: bool,
}

impl fmt::Display for SignatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)?;
        if self.optional {
            f.write_str("?")?;
        }
        if self.rest {
            f.write_str("...")?;
        }
        Ok(())
    }
}

impl FromStr for SignatureDescriptor {
    type Err = CompileError;

    /// Parse a signature token into a descriptor.
    ///
    /// The whole-token grammar is checked first; an unknown type keyword
    /// therefore fails as [`CompileError::InvalidSyntaxString`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if full_signature(s).is_err() {
            return Err(CompileError::InvalidSyntaxString(s.to_owned()));
        }
        let name = extract_name(s).ok_or_else(|| CompileError::InvalidTypeName(s.to_owned()))?;
        let kind = extract_type(s).ok_or_else(|| CompileError::InvalidType(s.to_owned()))?;

        Ok(Self {
            name: name.to_owned(),
            kind,
            optional: has_optional_marker(s),
            rest: has_rest_marker(s),
        })
    }
}

/// A descriptor together with the parser built for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSignature {
    pub descriptor: SignatureDescriptor,
    pub parser: ArgumentParser,
}

/// Compile one signature token with the standard registry.
pub fn compile(signature: &str, options: &TypeOptions) -> Result<CompiledSignature, CompileError> {
    let descriptor: SignatureDescriptor = signature.parse()?;
    let parser = TypeRegistry::standard()
        .build(descriptor.kind, &descriptor.name, options)
        .ok_or_else(|| CompileError::InvalidType(signature.to_owned()))?;
    Ok(CompiledSignature { descriptor, parser })
}

// ============================================================================
// Grammar
// ============================================================================

fn arg_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic())(input)
}

/// Match one of the registered type keywords.
fn type_keyword(input: &str) -> IResult<&str, TypeKind> {
    for kind in TypeRegistry::standard().kinds() {
        if let Ok((rest, _)) = tag::<_, _, nom::error::Error<&str>>(kind.keyword())(input) {
            return Ok((rest, kind));
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Tag)))
}

fn optional_marker(input: &str) -> IResult<&str, Option<char>> {
    opt(char('?'))(input)
}

fn rest_marker(input: &str) -> IResult<&str, Option<&str>> {
    opt(tag("..."))(input)
}

/// `name:type`, leaving the markers unconsumed.
fn head(input: &str) -> IResult<&str, (&str, TypeKind)> {
    let (input, name) = terminated(arg_name, char(':'))(input)?;
    let (input, kind) = type_keyword(input)?;
    Ok((input, (name, kind)))
}

fn full_signature(input: &str) -> IResult<&str, (&str, TypeKind, Option<char>, Option<&str>)> {
    let (rest, ((name, kind), optional, rest_tail)) =
        all_consuming(tuple((head, optional_marker, rest_marker)))(input)?;
    Ok((rest, (name, kind, optional, rest_tail)))
}

fn extract_name(input: &str) -> Option<&str> {
    terminated(arg_name, char(':'))(input)
        .ok()
        .map(|(_, name)| name)
}

fn extract_type(input: &str) -> Option<TypeKind> {
    head(input).ok().map(|(_, (_, kind))| kind)
}

fn has_optional_marker(input: &str) -> bool {
    matches!(
        head(input).and_then(|(rest, _)| optional_marker(rest)),
        Ok((_, Some(_)))
    )
}

fn has_rest_marker(input: &str) -> bool {
    let after_optional = head(input).and_then(|(rest, _)| optional_marker(rest));
    matches!(
        after_optional.and_then(|(rest, _)| rest_marker(rest)),
        Ok((_, Some(_)))
    )
}
