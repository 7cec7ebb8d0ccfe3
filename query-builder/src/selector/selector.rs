use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt::{Debug, Display};

use crate::common::{Value, AND_OPERATOR};
use crate::errors::{ErrorKind, QueryError, QueryResult};

/// A selector describes which documents a find should match.
///
/// A selector is an ordered key-value mapping. Keys are field names or
/// operators such as `$and`; values are [Value]s, possibly nested selectors.
/// Keys keep their insertion order so a selector prints the way it was built.
///
/// The query builder treats the content of a selector as opaque: it only
/// combines selectors, it never interprets field names or operators.
///
/// # Examples
///
/// ```rust
/// use query_builder::selector;
/// use query_builder::selector::Selector;
///
/// let mut by_name = Selector::new();
/// by_name.put("name", "Max").unwrap();
///
/// assert_eq!(by_name, selector! { name: "Max" });
/// ```
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Selector {
    data: IndexMap<String, Value>,
}

impl Selector {
    /// Creates an empty selector, which matches every document.
    pub fn new() -> Self {
        Selector {
            data: IndexMap::new(),
        }
    }

    /// Creates the conjunction `{ "$and": [c1, c2, ...] }` of the given selectors,
    /// keeping their order.
    pub fn and(conditions: Vec<Selector>) -> Self {
        let mut data = IndexMap::with_capacity(1);
        data.insert(
            AND_OPERATOR.to_string(),
            Value::Array(conditions.into_iter().map(Value::Selector).collect()),
        );
        Selector { data }
    }

    /// Associates `value` with `key`, replacing any previous value in place.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidFieldName] if the key is empty.
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> QueryResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Selector does not support empty key");
            return Err(QueryError::new(
                "Selector does not support empty key",
                ErrorKind::InvalidFieldName,
            ));
        }

        self.data.insert(key, value.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Removes `key`, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Returns the operands if this selector is exactly an `$and` conjunction.
    pub fn and_operands(&self) -> Option<&Vec<Value>> {
        if self.data.len() != 1 {
            return None;
        }
        self.data.get(AND_OPERATOR).and_then(|v| v.as_array())
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let indent_str = " ".repeat(indent + 2);
        let body = self
            .data
            .iter()
            .map(|(key, value)| {
                format!("{}\"{}\": {}", indent_str, key, value.to_pretty_json(indent + 2))
            })
            .join(",\n");
        format!("{{\n{}\n{}}}", body, " ".repeat(indent))
    }
}

impl Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Selector {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Selector {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Strips the quotes `stringify!` leaves around literal keys such as `"$and"`.
pub fn normalize_key(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Selector] with JSON-like syntax.
///
/// Keys are identifiers or string literals (use a literal for operator keys
/// such as `"$and"`). Values are literals, `null`, nested `{ .. }` selectors,
/// `[ .. ]` arrays or parenthesized expressions.
///
/// # Examples
///
/// ```rust
/// use query_builder::selector;
///
/// let empty = selector!{};
/// assert!(empty.is_empty());
///
/// let owner = "alice";
/// let complex = selector!{
///     deletedAt: null,
///     owner: (owner),
///     tags: ["admin", "user"],
///     "$and": [{ age: 30 }, { name: "Max" }]
/// };
/// assert_eq!(complex.size(), 4);
/// ```
#[macro_export]
macro_rules! selector {
    () => {
        $crate::selector::Selector::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            let mut selector = $crate::selector::Selector::new();
            $(
                selector.put(
                    $crate::selector::normalize_key(stringify!($key)),
                    $crate::selector_value!($value),
                )
                .expect(&format!("Failed to put value {} in selector", stringify!($value)));
            )*
            selector
        }
    };
}

/// Helper macro converting values for the [selector!] macro.
#[macro_export]
macro_rules! selector_value {
    (null) => {
        $crate::common::Value::Null
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Selector($crate::selector!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::selector_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
