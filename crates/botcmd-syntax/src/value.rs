//! Typed argument values.

use crate::types::TypeKind;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

/// Provisional reference to a chat entity, holding the raw token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityRef(String);

impl EntityRef {
    /// Wrap a raw token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One parsed argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum Value {
    String(String),
    Boolean(bool),
    Number(f64),
    Channel(EntityRef),
    Member(EntityRef),
    Guild(EntityRef),
    Role(EntityRef),
    User(EntityRef),
}

impl Value {
    /// Type the value was parsed as.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::String(_) => TypeKind::String,
            Self::Boolean(_) => TypeKind::Boolean,
            Self::Number(_) => TypeKind::Number,
            Self::Channel(_) => TypeKind::Channel,
            Self::Member(_) => TypeKind::Member,
            Self::Guild(_) => TypeKind::Guild,
            Self::Role(_) => TypeKind::Role,
            Self::User(_) => TypeKind::User,
        }
    }

    /// Text of a string value or the raw token of an entity reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Boolean(_) | Self::Number(_) => None,
            Self::Channel(r) | Self::Member(r) | Self::Guild(r) | Self::Role(r) | Self::User(r) => {
                Some(r.as_str())
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&EntityRef> {
        match self {
            Self::Channel(r) | Self::Member(r) | Self::Guild(r) | Self::Role(r) | Self::User(r) => {
                Some(r)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Channel(r) | Self::Member(r) | Self::Guild(r) | Self::Role(r) | Self::User(r) => {
                write!(f, "{r}")
            }
        }
    }
}

/// Parsed arguments, one [`Value`] per input token.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Arguments(SmallVec<[Value; 4]>);

impl Arguments {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// String (or entity raw token) at `index`.
    pub fn str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Value::as_str)
    }

    pub fn bool(&self, index: usize) -> Option<bool> {
        self.get(index).and_then(Value::as_bool)
    }

    pub fn number(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(Value::as_number)
    }

    pub fn entity(&self, index: usize) -> Option<&EntityRef> {
        self.get(index).and_then(Value::as_entity)
    }

    /// Values from `index` on, e.g. everything a rest argument captured.
    pub fn tail(&self, index: usize) -> &[Value] {
        self.0.get(index..).unwrap_or_default()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0.into_vec()
    }
}

impl Index<usize> for Arguments {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl FromIterator<Value> for Arguments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Arguments {
    type Item = Value;
    type IntoIter = smallvec::IntoIter<[Value; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
