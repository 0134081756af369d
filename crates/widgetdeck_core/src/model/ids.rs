//! Prefixed entity identifiers.
//!
//! # Responsibility
//! - Generate process-unique ids for new widgets and categories.
//! - Validate that persisted ids carry the expected entity prefix.
//!
//! # Invariants
//! - Widget and category ids are drawn from disjoint prefix spaces.
//! - A generated id is never reused within the process lifetime
//!   (v4 UUID suffix; collisions are astronomically unlikely, this is
//!   not a cryptographic guarantee).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const WIDGET_ID_PREFIX: &str = "widget-";
pub const CATEGORY_ID_PREFIX: &str = "category-";

/// Validation error for prefixed entity ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    WrongPrefix {
        expected: &'static str,
        value: String,
    },
    EmptySuffix {
        prefix: &'static str,
    },
}

impl Display for IdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongPrefix { expected, value } => {
                write!(f, "id `{value}` does not start with `{expected}`")
            }
            Self::EmptySuffix { prefix } => {
                write!(f, "id must contain a non-empty suffix after `{prefix}`")
            }
        }
    }
}

impl Error for IdError {}

fn validate_prefixed(value: &str, prefix: &'static str) -> Result<(), IdError> {
    match value.strip_prefix(prefix) {
        Some(suffix) if !suffix.is_empty() => Ok(()),
        Some(_) => Err(IdError::EmptySuffix { prefix }),
        None => Err(IdError::WrongPrefix {
            expected: prefix,
            value: value.to_string(),
        }),
    }
}

/// Stable identifier for a widget (`widget-` prefix).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WidgetId(String);

impl WidgetId {
    /// Generates a fresh id with a random v4 UUID suffix.
    pub fn generate() -> Self {
        Self(format!("{WIDGET_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Wraps an existing id value, validating its prefix.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_prefixed(&value, WIDGET_ID_PREFIX)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WidgetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WidgetId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WidgetId> for String {
    fn from(value: WidgetId) -> Self {
        value.0
    }
}

/// Stable identifier for a category (`category-` prefix).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    /// Generates a fresh id with a random v4 UUID suffix.
    pub fn generate() -> Self {
        Self(format!("{CATEGORY_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Wraps an existing id value, validating its prefix.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_prefixed(&value, CATEGORY_ID_PREFIX)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CategoryId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryId> for String {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}
