use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::common::Value;
use crate::errors::{ErrorKind, QueryError, QueryResult};
use crate::selector::Selector;

/// Signature of a computed filter: a pure function of the query-supplied arguments.
pub type FilterFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// The value of a named filter.
///
/// A filter either contributes a fixed selector, or computes its contribution
/// from the arguments given when the filter is toggled on a query.
///
/// # Examples
///
/// ```rust
/// use query_builder::selector;
/// use query_builder::common::Value;
/// use query_builder::filter::FilterValue;
///
/// let soft_delete = FilterValue::from(selector! { deletedAt: null });
/// assert_eq!(soft_delete.resolve(&[]), Value::from(selector! { deletedAt: null }));
///
/// let by_owner = FilterValue::computed(|args: &[Value]| {
///     selector! { owner: (args.first().cloned().unwrap_or_default()) }
/// });
/// assert_eq!(
///     by_owner.resolve(&[Value::from("alice")]),
///     Value::from(selector! { owner: "alice" })
/// );
/// ```
#[derive(Clone)]
pub enum FilterValue {
    /// A fixed selector fragment.
    Static(Selector),
    /// A function invoked with the toggle arguments at build time.
    Computed(Arc<FilterFn>),
}

impl FilterValue {
    /// Wraps a function as a computed filter. The function result may be
    /// anything convertible into a [Value]; results that are not a string,
    /// an id or a selector are ignored when the query is built.
    pub fn computed<F, R>(f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        FilterValue::Computed(Arc::new(move |args: &[Value]| f(args).into()))
    }

    /// Produces the raw condition of this filter for the given arguments.
    ///
    /// Static filters ignore the arguments.
    pub fn resolve(&self, args: &[Value]) -> Value {
        match self {
            FilterValue::Static(selector) => Value::Selector(selector.clone()),
            FilterValue::Computed(f) => f(args),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, FilterValue::Static(_))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, FilterValue::Computed(_))
    }
}

impl Debug for FilterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Static(selector) => write!(f, "Static({:?})", selector),
            FilterValue::Computed(_) => write!(f, "Computed(<fn>)"),
        }
    }
}

impl From<Selector> for FilterValue {
    fn from(selector: Selector) -> Self {
        FilterValue::Static(selector)
    }
}

/// Conversion into a [FilterValue], checked at registration time.
///
/// Only selectors and functions make valid filters; converting any other
/// [Value] fails with [ErrorKind::InvalidFilterType].
pub trait IntoFilterValue {
    fn into_filter_value(self) -> QueryResult<FilterValue>;
}

impl IntoFilterValue for FilterValue {
    fn into_filter_value(self) -> QueryResult<FilterValue> {
        Ok(self)
    }
}

impl IntoFilterValue for Selector {
    fn into_filter_value(self) -> QueryResult<FilterValue> {
        Ok(FilterValue::Static(self))
    }
}

impl IntoFilterValue for Value {
    fn into_filter_value(self) -> QueryResult<FilterValue> {
        match self {
            Value::Selector(selector) => Ok(FilterValue::Static(selector)),
            other => {
                log::error!(
                    "A filter must be a selector or a function, got {}",
                    other.type_name()
                );
                Err(QueryError::new(
                    &format!(
                        "A filter must be a selector or a function, got {}",
                        other.type_name()
                    ),
                    ErrorKind::InvalidFilterType,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector;

    #[test]
    fn static_value_ignores_args() {
        let value = FilterValue::from(selector! { deletedAt: null });
        assert!(value.is_static());
        assert_eq!(
            value.resolve(&[Value::from(1)]),
            Value::from(selector! { deletedAt: null })
        );
    }

    #[test]
    fn computed_value_receives_args_in_order() {
        let value = FilterValue::computed(|args: &[Value]| Value::Array(args.to_vec()));
        assert!(value.is_computed());
        assert_eq!(
            value.resolve(&[Value::from("a"), Value::from(2)]),
            Value::from(vec![Value::from("a"), Value::from(2)])
        );
    }

    #[test]
    fn computed_value_with_no_args() {
        let value = FilterValue::computed(|args: &[Value]| args.len() as i64);
        assert_eq!(value.resolve(&[]), Value::I64(0));
    }

    #[test]
    fn value_selector_converts() {
        let value = Value::from(selector! { a: 1 }).into_filter_value().unwrap();
        assert!(value.is_static());
    }

    #[test]
    fn non_selector_value_is_rejected() {
        for bad in [Value::Null, Value::from("x"), Value::from(3), Value::from(vec![1])] {
            let err = bad.into_filter_value().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidFilterType);
        }
    }

    #[test]
    fn debug_hides_function() {
        let value = FilterValue::computed(|_: &[Value]| Value::Null);
        assert_eq!(format!("{:?}", value), "Computed(<fn>)");
    }
}
