use smallvec::SmallVec;

use crate::common::Value;
use crate::errors::{ErrorKind, QueryError, QueryResult};

/// Arguments passed to a computed filter.
pub type FilterArgs = SmallVec<[Value; 4]>;

/// A per-query override of a filter's enabled state.
///
/// When a query holds a toggle for a filter, the toggle decides whether the
/// filter applies, regardless of the filter's default flag. The toggle's
/// arguments are handed to computed filters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterToggle {
    enabled: bool,
    args: FilterArgs,
}

impl FilterToggle {
    pub fn new(enabled: bool, args: impl IntoIterator<Item = Value>) -> Self {
        FilterToggle {
            enabled,
            args: args.into_iter().collect(),
        }
    }

    pub fn enabled() -> Self {
        FilterToggle::new(true, FilterArgs::new())
    }

    pub fn disabled() -> Self {
        FilterToggle::new(false, FilterArgs::new())
    }

    /// Creates a toggle whose arguments come from a [Value].
    ///
    /// `args` must be a [Value::Array]; [Value::Null] stands for "no
    /// arguments".
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::InvalidArgumentType] for any other value.
    pub fn with_args(enabled: bool, args: Value) -> QueryResult<Self> {
        match args {
            Value::Array(args) => Ok(FilterToggle::new(enabled, args)),
            Value::Null => Ok(FilterToggle::new(enabled, FilterArgs::new())),
            other => {
                log::error!("Filter arguments must be an array, got {}", other.type_name());
                Err(QueryError::new(
                    &format!("Filter arguments must be an array, got {}", other.type_name()),
                    ErrorKind::InvalidArgumentType,
                ))
            }
        }
    }

    /// Creates a toggle from a single modifier value.
    ///
    /// - `true` / `false` enables or disables the filter without arguments
    /// - an array enables the filter and uses the array as its arguments
    /// - `null` disables the filter
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::InvalidArgumentType] for any other value.
    pub fn from_modifier(modifier: Value) -> QueryResult<Self> {
        match modifier {
            Value::Bool(enabled) => Ok(FilterToggle::new(enabled, FilterArgs::new())),
            Value::Array(args) => Ok(FilterToggle::new(true, args)),
            Value::Null => Ok(FilterToggle::disabled()),
            other => {
                log::error!(
                    "Filter modifier must be a bool or an array, got {}",
                    other.type_name()
                );
                Err(QueryError::new(
                    &format!(
                        "Filter modifier must be a bool or an array, got {}",
                        other.type_name()
                    ),
                    ErrorKind::InvalidArgumentType,
                ))
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}
