use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, QueryError, QueryResult};
use crate::selector::Selector;

/// Converts a condition-like value into a selector fragment.
///
/// Identifier values (strings and [crate::common::ObjectId]s) become an
/// equality on `_id`; selectors are returned unchanged. Every other value
/// yields `None`.
///
/// # Examples
///
/// ```rust
/// use query_builder::selector;
/// use query_builder::common::Value;
/// use query_builder::selector::normalize_condition;
///
/// assert_eq!(normalize_condition("someId".into()), Some(selector! { _id: "someId" }));
/// assert_eq!(normalize_condition(selector! { a: 1 }.into()), Some(selector! { a: 1 }));
/// assert_eq!(normalize_condition(Value::I32(1)), None);
/// ```
pub fn normalize_condition(value: Value) -> Option<Selector> {
    match value {
        Value::String(_) | Value::Id(_) => {
            let mut selector = Selector::new();
            // DOC_ID is never empty
            selector.put(DOC_ID, value).ok()?;
            Some(selector)
        }
        Value::Selector(selector) => Some(selector),
        _ => None,
    }
}

/// Same as [normalize_condition] but fails with [ErrorKind::InvalidConditionType].
pub fn require_condition(value: Value) -> QueryResult<Selector> {
    let type_name = value.type_name();
    match normalize_condition(value) {
        Some(selector) => Ok(selector),
        None => {
            log::error!("Unknown condition type {}", type_name);
            Err(QueryError::new(
                &format!("Unknown condition type {}", type_name),
                ErrorKind::InvalidConditionType,
            ))
        }
    }
}
