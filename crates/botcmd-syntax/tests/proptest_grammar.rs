//! Property-based tests for the signature grammar and parser arity.
//!
//! Uses proptest to generate random signatures and token streams and verify:
//! 1. Every well-formed signature compiles to the descriptor it spells out
//! 2. Tokens outside the grammar never compile and never panic
//! 3. Successful parses yield exactly one value per token

use botcmd_syntax::{CompileError, SignatureDescriptor, SyntaxParser, TypeKind};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn kind_strategy() -> impl Strategy<Value = TypeKind> {
    prop::sample::select(TypeKind::ALL.to_vec())
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{1,12}").expect("valid regex")
}

/// Whitespace-free tokens that are accepted by the `string` type.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{1,10}").expect("valid regex")
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn well_formed_signatures_compile(
        name in name_strategy(),
        kind in kind_strategy(),
        optional in any::<bool>(),
        rest in any::<bool>(),
    ) {
        let raw = format!(
            "{name}:{}{}{}",
            kind.keyword(),
            if optional { "?" } else { "" },
            if rest { "..." } else { "" },
        );
        let descriptor: SignatureDescriptor = raw.parse().unwrap();
        prop_assert_eq!(&descriptor.name, &name);
        prop_assert_eq!(descriptor.kind, kind);
        prop_assert_eq!(descriptor.optional, optional);
        prop_assert_eq!(descriptor.rest, rest);
        prop_assert_eq!(descriptor.to_string(), raw);
    }

    #[test]
    fn arbitrary_text_never_panics(raw in "\\PC{0,24}") {
        match raw.parse::<SignatureDescriptor>() {
            Ok(d) => prop_assert_eq!(d.to_string(), raw),
            Err(e) => prop_assert!(matches!(e, CompileError::InvalidSyntaxString(_))),
        }
    }

    #[test]
    fn string_signature_yields_one_value_per_token(
        required in 0usize..4,
        tokens in prop::collection::vec(word_strategy(), 0..8),
    ) {
        let mut signatures: Vec<String> = (0..required).map(|i| format!("a{}:string", "x".repeat(i))).collect();
        signatures.push("tail:string?...".to_owned());
        let parser = SyntaxParser::from_signatures(signatures).unwrap();

        match parser.parse(&(), &(), tokens.as_slice()) {
            Ok(args) => {
                prop_assert!(tokens.len() >= required);
                prop_assert_eq!(args.len(), tokens.len());
            }
            Err(err) => {
                prop_assert!(tokens.len() < required);
                prop_assert_eq!(err.error_code(), "missing_argument");
            }
        }
    }

    #[test]
    fn closed_signature_rejects_surplus(
        tokens in prop::collection::vec(word_strategy(), 3..8),
    ) {
        let parser = SyntaxParser::new("a:string b:string").unwrap();
        let err = parser.parse(&(), &(), tokens.as_slice()).unwrap_err();
        prop_assert_eq!(err.payload().kind.as_str(), "PARSE_ERROR");
        prop_assert_eq!(err.error_code(), "unexpected_argument");
    }
}
