//! Selectors and the condition normalization rule.
//!
//! A [`Selector`] is the structured object handed to a collection's find.
//! Conditions given to the query builder, and the values produced by filters,
//! are turned into selectors by [`normalize_condition`]:
//!
//! - a string or [`crate::common::ObjectId`] becomes `{ "_id": value }`
//! - a selector is used unchanged
//! - anything else cannot be used as a condition

mod condition;
mod selector;

pub use condition::*;
pub use selector::*;
