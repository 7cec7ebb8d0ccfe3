use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for query construction.
///
/// Every failure raised by the registry or the query builder carries one of
/// these kinds so callers can match on the category instead of the message.
///
/// # Examples
///
/// ```rust
/// use query_builder::errors::{ErrorKind, QueryError, QueryResult};
///
/// fn example() -> QueryResult<()> {
///     Err(QueryError::new("bad condition", ErrorKind::InvalidConditionType))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::InvalidConditionType);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A filter value is neither a selector nor a callable
    InvalidFilterType,
    /// A condition could not be normalized into a selector
    InvalidConditionType,
    /// Filter arguments were not an ordered sequence
    InvalidArgumentType,
    /// A selector key is empty
    InvalidFieldName,
    /// The host collection failed to run a find
    FindError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidFilterType => write!(f, "Invalid filter type"),
            ErrorKind::InvalidConditionType => write!(f, "Invalid condition type"),
            ErrorKind::InvalidArgumentType => write!(f, "Invalid argument type"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::FindError => write!(f, "Find error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type of the query builder.
///
/// `QueryError` holds the message, the [ErrorKind], an optional cause and the
/// backtrace captured at the point of creation.
///
/// # Examples
///
/// ```rust
/// use query_builder::errors::{ErrorKind, QueryError};
///
/// let cause = QueryError::new("collection offline", ErrorKind::FindError);
/// let err = QueryError::new_with_cause("query failed", ErrorKind::FindError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct QueryError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<QueryError>>,
    backtrace: Arc<Backtrace>,
}

impl QueryError {
    /// Creates a new `QueryError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        QueryError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `QueryError` which keeps `cause` as the source of the failure.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: QueryError) -> Self {
        QueryError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&QueryError> {
        self.cause.as_deref()
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for query builder operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(feature = "serde")]
impl serde::de::Error for QueryError {
    fn custom<T: Display>(msg: T) -> Self {
        QueryError::new(&msg.to_string(), ErrorKind::InternalError)
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for QueryError {
    fn custom<T: Display>(msg: T) -> Self {
        QueryError::new(&msg.to_string(), ErrorKind::InternalError)
    }
}

impl From<String> for QueryError {
    fn from(msg: String) -> Self {
        QueryError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for QueryError {
    fn from(msg: &str) -> Self {
        QueryError::new(msg, ErrorKind::InternalError)
    }
}
