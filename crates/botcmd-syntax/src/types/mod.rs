//! Argument types and the registry that builds their parsers.
//!
//! The set of types is closed: every [`TypeKind`] has exactly one entry in
//! the registry table, built at compile time. Signature compilation looks a
//! kind up in [`TypeRegistry::standard`] to obtain an [`ArgumentParser`].

mod entity;
mod scalar;
mod string;

pub use entity::{EntityKind, EntityType};
pub use scalar::{BooleanType, NumberType};
pub use string::{StringOptions, StringType, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};

use crate::error::ParseError;
use crate::value::Value;
use std::fmt;

/// Type keyword accepted after the `:` of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TypeKind {
    /// Free text, bounded in length.
    String,
    /// `true` or `false`.
    Boolean,
    /// Finite decimal number.
    Number,
    /// Channel reference.
    Channel,
    /// Guild member reference.
    Member,
    /// Guild reference.
    Guild,
    /// Role reference.
    Role,
    /// User reference.
    User,
}

impl TypeKind {
    /// Every kind, in keyword order.
    pub const ALL: [TypeKind; 8] = [
        TypeKind::String,
        TypeKind::Boolean,
        TypeKind::Number,
        TypeKind::Channel,
        TypeKind::Member,
        TypeKind::Guild,
        TypeKind::Role,
        TypeKind::User,
    ];

    /// Keyword used in signature strings.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Channel => "channel",
            Self::Member => "member",
            Self::Guild => "guild",
            Self::Role => "role",
            Self::User => "user",
        }
    }

    /// The reference kind, for kinds whose values point at live chat entities.
    pub fn entity(self) -> Option<EntityKind> {
        match self {
            Self::String | Self::Boolean | Self::Number => None,
            Self::Channel => Some(EntityKind::Channel),
            Self::Member => Some(EntityKind::Member),
            Self::Guild => Some(EntityKind::Guild),
            Self::Role => Some(EntityKind::Role),
            Self::User => Some(EntityKind::User),
        }
    }

    /// Kinds whose values are references to live chat entities.
    pub fn is_entity(self) -> bool {
        self.entity().is_some()
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Per-type configuration handed to constructors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeOptions {
    /// Length bounds applied to `string` arguments.
    pub string: StringOptions,
}

/// A parser bound to one argument type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentParser {
    /// `string`
    String(StringType),
    /// `boolean`
    Boolean(BooleanType),
    /// `number`
    Number(NumberType),
    /// `channel`, `member`, `guild`, `role`, `user`
    Entity(EntityType),
}

impl ArgumentParser {
    /// Kind this parser was built for.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::String(_) => TypeKind::String,
            Self::Boolean(_) => TypeKind::Boolean,
            Self::Number(_) => TypeKind::Number,
            Self::Entity(entity) => entity.kind(),
        }
    }

    /// Name of the argument this parser is bound to.
    pub fn name(&self) -> &str {
        match self {
            Self::String(t) => t.name(),
            Self::Boolean(t) => t.name(),
            Self::Number(t) => t.name(),
            Self::Entity(t) => t.name(),
        }
    }

    /// Parse one raw token at position `index`.
    ///
    /// `session` and `message` are passed through untouched; only entity
    /// types are expected to care about them, and even those defer the
    /// actual lookup to the session owner.
    pub fn parse<S: ?Sized, M: ?Sized>(
        &self,
        session: &S,
        message: &M,
        token: &str,
        index: usize,
    ) -> Result<Value, ParseError> {
        match self {
            Self::String(t) => t.parse(token, index),
            Self::Boolean(t) => t.parse(token, index),
            Self::Number(t) => t.parse(token, index),
            Self::Entity(t) => t.parse(session, message, token, index),
        }
    }
}

/// Constructor stored in the registry table.
pub type TypeConstructor = fn(&str, &TypeOptions) -> ArgumentParser;

fn string_type(name: &str, options: &TypeOptions) -> ArgumentParser {
    ArgumentParser::String(StringType::new(name, options.string))
}

fn boolean_type(name: &str, _: &TypeOptions) -> ArgumentParser {
    ArgumentParser::Boolean(BooleanType::new(name))
}

fn number_type(name: &str, _: &TypeOptions) -> ArgumentParser {
    ArgumentParser::Number(NumberType::new(name))
}

fn channel_type(name: &str, _: &TypeOptions) -> ArgumentParser {
    ArgumentParser::Entity(EntityType::new(name, EntityKind::Channel))
}

fn member_type(name: &str, _: &TypeOptions) -> ArgumentParser {
    ArgumentParser::Entity(EntityType::new(name, EntityKind::Member))
}

fn guild_type(name: &str, _: &TypeOptions) -> ArgumentParser {
    ArgumentParser::Entity(EntityType::new(name, EntityKind::Guild))
}

fn role_type(name: &str, _: &TypeOptions) -> ArgumentParser {
    ArgumentParser::Entity(EntityType::new(name, EntityKind::Role))
}

fn user_type(name: &str, _: &TypeOptions) -> ArgumentParser {
    ArgumentParser::Entity(EntityType::new(name, EntityKind::User))
}

const STANDARD_TABLE: [(TypeKind, TypeConstructor); 8] = [
    (TypeKind::String, string_type),
    (TypeKind::Boolean, boolean_type),
    (TypeKind::Number, number_type),
    (TypeKind::Channel, channel_type),
    (TypeKind::Member, member_type),
    (TypeKind::Guild, guild_type),
    (TypeKind::Role, role_type),
    (TypeKind::User, user_type),
];

static STANDARD: TypeRegistry = TypeRegistry {
    table: &STANDARD_TABLE,
};

/// Fixed mapping from [`TypeKind`] to parser constructors.
#[derive(Debug)]
pub struct TypeRegistry {
    table: &'static [(TypeKind, TypeConstructor)],
}

impl TypeRegistry {
    /// The registry covering every [`TypeKind`].
    pub fn standard() -> &'static TypeRegistry {
        &STANDARD
    }

    /// Registered kinds, in table order.
    pub fn kinds(&self) -> impl Iterator<Item = TypeKind> + '_ {
        self.table.iter().map(|(kind, _)| *kind)
    }

    /// Whether `kind` has a constructor.
    pub fn contains(&self, kind: TypeKind) -> bool {
        self.table.iter().any(|(k, _)| *k == kind)
    }

    /// Build the parser for `kind`, or `None` if the kind is not registered.
    pub fn build(&self, kind: TypeKind, name: &str, options: &TypeOptions) -> Option<ArgumentParser> {
        self.table
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, construct)| construct(name, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_every_kind() {
        let registry = TypeRegistry::standard();
        for kind in TypeKind::ALL {
            assert!(registry.contains(kind), "{kind} missing");
            let parser = registry
                .build(kind, "arg", &TypeOptions::default())
                .expect("constructor");
            assert_eq!(parser.kind(), kind);
            assert_eq!(parser.name(), "arg");
        }
        assert_eq!(registry.kinds().count(), TypeKind::ALL.len());
    }

    #[test]
    fn keywords_are_lowercase_names() {
        let keywords: Vec<_> = TypeKind::ALL.iter().map(|k| k.keyword()).collect();
        assert_eq!(
            keywords,
            ["string", "boolean", "number", "channel", "member", "guild", "role", "user"]
        );
    }

    #[test]
    fn only_references_are_entities() {
        assert!(!TypeKind::String.is_entity());
        assert!(!TypeKind::Number.is_entity());
        assert!(TypeKind::Member.is_entity());
        assert!(TypeKind::Guild.is_entity());
    }
}
