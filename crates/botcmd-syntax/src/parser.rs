//! Runtime syntax parser.
//!
//! A [`SyntaxParser`] owns the raw signature strings of one command, their
//! compiled descriptors, and applies them to a whitespace-split token stream.

use crate::error::{CompileError, ParseError, SyntaxError};
use crate::signature::{compile, CompiledSignature, SignatureDescriptor};
use crate::types::{StringOptions, TypeOptions};
use crate::value::Arguments;
use smallvec::SmallVec;
use tracing::trace;

/// Ordered argument grammar for one command.
#[derive(Debug, Clone)]
pub struct SyntaxParser {
    raw: Vec<String>,
    compiled: Vec<CompiledSignature>,
    options: TypeOptions,
    multi_syntax: bool,
    /// Set when compilation inputs changed since the last [`refresh`](Self::refresh).
    dirty: bool,
}

impl SyntaxParser {
    /// Build a parser from one space-separated signature string.
    ///
    /// ```
    /// use botcmd_syntax::SyntaxParser;
    ///
    /// let parser = SyntaxParser::new("target:user reason:string...").unwrap();
    /// assert_eq!(parser.len(), 2);
    /// ```
    pub fn new(syntax: &str) -> Result<Self, SyntaxError> {
        Self::build(syntax.split_whitespace().map(str::to_owned).collect(), false)
    }

    /// Build a parser from one signature per entry.
    pub fn from_signatures<I, S>(signatures: I) -> Result<Self, SyntaxError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(signatures.into_iter().map(Into::into).collect(), true)
    }

    fn build(raw: Vec<String>, multi_syntax: bool) -> Result<Self, SyntaxError> {
        let mut parser = Self {
            raw,
            compiled: Vec::new(),
            options: TypeOptions::default(),
            multi_syntax,
            dirty: true,
        };
        parser.refresh()?;
        Ok(parser)
    }

    /// Replace the type options, recompiling every signature.
    pub fn with_options(mut self, options: TypeOptions) -> Result<Self, SyntaxError> {
        self.set_options(options)?;
        Ok(self)
    }

    /// Replace the type options, recompiling every signature.
    pub fn set_options(&mut self, options: TypeOptions) -> Result<&mut Self, SyntaxError> {
        if self.options != options {
            self.options = options;
            self.dirty = true;
        }
        self.refresh()?;
        Ok(self)
    }

    /// Shortcut for changing only the `string` length bounds.
    pub fn set_string_bounds(
        &mut self,
        min_length: usize,
        max_length: usize,
    ) -> Result<&mut Self, SyntaxError> {
        let options = TypeOptions {
            string: StringOptions {
                min_length,
                max_length,
            },
        };
        self.set_options(options)
    }

    /// Append a signature.
    ///
    /// The signature is compiled before it is stored, so a malformed one
    /// leaves the parser unchanged.
    pub fn add_syntax(&mut self, signature: &str) -> Result<&mut Self, SyntaxError> {
        let compiled = compile(signature, &self.options)?;
        self.raw.push(signature.to_owned());
        self.compiled.push(compiled);
        Ok(self)
    }

    /// Remove the signature at `index`, returning it.
    pub fn remove_syntax(&mut self, index: usize) -> Option<String> {
        if index >= self.raw.len() {
            return None;
        }
        self.compiled.remove(index);
        Some(self.raw.remove(index))
    }

    /// Flag registration point. Flags are not implemented yet.
    pub fn add_flag(&mut self, _names: &[&str], _syntax: &str) -> Result<&mut Self, SyntaxError> {
        Err(CompileError::Unsupported("flags").into())
    }

    /// Flag removal point. Flags are not implemented yet.
    pub fn remove_flag(&mut self, _name: &str) -> Result<&mut Self, SyntaxError> {
        Err(CompileError::Unsupported("flags").into())
    }

    /// Recompile every signature if anything changed since the last call.
    pub fn refresh(&mut self) -> Result<(), SyntaxError> {
        if !self.dirty {
            return Ok(());
        }
        self.compiled = self
            .raw
            .iter()
            .map(|s| compile(s, &self.options))
            .collect::<Result<_, _>>()?;
        self.dirty = false;
        trace!(signatures = self.raw.len(), "syntax recompiled");
        Ok(())
    }

    /// Raw signature strings, in order.
    pub fn signatures(&self) -> &[String] {
        &self.raw
    }

    /// Compiled descriptors, in order.
    pub fn descriptors(&self) -> impl Iterator<Item = &SignatureDescriptor> + '_ {
        self.compiled.iter().map(|c| &c.descriptor)
    }

    pub fn options(&self) -> &TypeOptions {
        &self.options
    }

    /// Whether the parser was built from a signature list.
    ///
    /// Recorded for callers; parsing does not depend on it.
    pub fn multi_syntax(&self) -> bool {
        self.multi_syntax
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Parse `tokens` into one typed value per token.
    ///
    /// Arity is checked before any token is parsed:
    /// 1. the first required descriptor without a token fails the parse;
    /// 2. extra tokens fail unless the last descriptor is optional or rest.
    ///
    /// From the first rest descriptor on, every token is parsed by that
    /// descriptor. Tokens past an optional tail are parsed by the last one.
    pub fn parse<S, M, T>(
        &self,
        session: &S,
        message: &M,
        tokens: &[T],
    ) -> Result<Arguments, SyntaxError>
    where
        S: ?Sized,
        M: ?Sized,
        T: AsRef<str>,
    {
        if let Some((index, entry)) = self
            .compiled
            .iter()
            .enumerate()
            .find(|(index, entry)| !entry.descriptor.optional && *index >= tokens.len())
        {
            return Err(ParseError::MissingArgument {
                index,
                descriptor: entry.descriptor.clone(),
            }
            .into());
        }

        let open_tail = self
            .compiled
            .last()
            .is_some_and(|last| last.descriptor.optional || last.descriptor.rest);
        if tokens.len() > self.compiled.len() && !open_tail {
            let index = self.compiled.len();
            return Err(ParseError::UnexpectedArgument {
                index,
                token: tokens[index].as_ref().to_owned(),
            }
            .into());
        }

        let mut values = SmallVec::<[_; 4]>::with_capacity(tokens.len());
        let mut rest: Option<&CompiledSignature> = None;
        for (index, token) in tokens.iter().enumerate() {
            let entry = match rest {
                Some(entry) => entry,
                None => {
                    // open_tail guarantees a last entry when index is out of range
                    let Some(entry) = self.compiled.get(index).or(self.compiled.last()) else {
                        return Err(ParseError::UnexpectedArgument {
                            index,
                            token: token.as_ref().to_owned(),
                        }
                        .into());
                    };
                    if entry.descriptor.rest {
                        rest = Some(entry);
                    }
                    entry
                }
            };
            values.push(entry.parser.parse(session, message, token.as_ref(), index)?);
        }

        Ok(values.into_iter().collect())
    }
}
