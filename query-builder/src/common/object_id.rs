use std::fmt::{Debug, Display};
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{ErrorKind, QueryError, QueryResult};

/// An opaque document identifier.
///
/// Used as an identifier-only condition: passing an `ObjectId` to
/// [`crate::query::QueryBuilder::condition`] produces the selector
/// `{ "_id": <id> }`, the same way a plain string does.
///
/// # Examples
///
/// ```rust
/// use query_builder::common::ObjectId;
///
/// let id = ObjectId::new();
/// let parsed = ObjectId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId {
    id_value: Uuid,
}

impl ObjectId {
    /// Generates a new random `ObjectId`.
    pub fn new() -> Self {
        ObjectId {
            id_value: Uuid::new_v4(),
        }
    }

    /// Parses an `ObjectId` from its hyphenated string form.
    pub fn parse(value: &str) -> QueryResult<Self> {
        match Uuid::from_str(value) {
            Ok(id_value) => Ok(ObjectId { id_value }),
            Err(err) => {
                log::error!("Invalid object id {}: {}", value, err);
                Err(QueryError::new(
                    &format!("Invalid object id {}: {}", value, err),
                    ErrorKind::InvalidConditionType,
                ))
            }
        }
    }

    pub fn id_value(&self) -> Uuid {
        self.id_value
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        ObjectId::new()
    }
}

impl From<Uuid> for ObjectId {
    fn from(id_value: Uuid) -> Self {
        ObjectId { id_value }
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id_value)
    }
}

impl Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.id_value)
    }
}
