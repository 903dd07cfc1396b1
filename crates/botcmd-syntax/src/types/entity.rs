//! Chat entity reference types (`channel`, `member`, `guild`, `role`, `user`).
//!
//! Turning an ID or mention into a live object needs the session, and that
//! lookup belongs to whoever owns the session. These parsers only bind the
//! raw token to its kind as a provisional [`EntityRef`].

use super::TypeKind;
use crate::error::ParseError;
use crate::value::{EntityRef, Value};

/// The reference kinds, a closed subset of [`TypeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Channel,
    Member,
    Guild,
    Role,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Channel,
        EntityKind::Member,
        EntityKind::Guild,
        EntityKind::Role,
        EntityKind::User,
    ];

    pub fn type_kind(self) -> TypeKind {
        match self {
            Self::Channel => TypeKind::Channel,
            Self::Member => TypeKind::Member,
            Self::Guild => TypeKind::Guild,
            Self::Role => TypeKind::Role,
            Self::User => TypeKind::User,
        }
    }
}

impl From<EntityKind> for TypeKind {
    fn from(kind: EntityKind) -> Self {
        kind.type_kind()
    }
}

/// Parser for entity references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    name: String,
    kind: EntityKind,
}

impl EntityType {
    /// Create an entity parser for argument `name`.
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type keyword kind.
    pub fn kind(&self) -> TypeKind {
        self.kind.type_kind()
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.kind
    }

    /// Identity parse: the token becomes the reference.
    pub fn parse<S: ?Sized, M: ?Sized>(
        &self,
        _session: &S,
        _message: &M,
        token: &str,
        _index: usize,
    ) -> Result<Value, ParseError> {
        let reference = EntityRef::new(token);
        Ok(match self.kind {
            EntityKind::Channel => Value::Channel(reference),
            EntityKind::Member => Value::Member(reference),
            EntityKind::Guild => Value::Guild(reference),
            EntityKind::Role => Value::Role(reference),
            EntityKind::User => Value::User(reference),
        })
    }
}
