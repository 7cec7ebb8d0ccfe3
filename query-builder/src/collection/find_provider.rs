use crate::collection::FindOptions;
use crate::errors::QueryResult;
use crate::selector::Selector;

/// The find capability of a host document collection.
///
/// This is the only thing the query builder needs from the underlying
/// collection: something that runs a [Selector] and returns a result. The
/// result type is opaque and is returned to the caller untouched.
///
/// # Examples
///
/// ```rust
/// use query_builder::collection::{FindOptions, FindProvider};
/// use query_builder::errors::QueryResult;
/// use query_builder::selector::Selector;
///
/// struct Printer;
///
/// impl FindProvider for Printer {
///     type Cursor = String;
///
///     fn find_with_options(&self, selector: Selector, _: &FindOptions) -> QueryResult<String> {
///         Ok(selector.to_string())
///     }
/// }
///
/// assert_eq!(Printer.find(Selector::new()).unwrap(), "{}");
/// ```
pub trait FindProvider {
    /// What a find returns, e.g. a cursor over matching documents.
    type Cursor;

    /// Finds documents matching the selector with default options.
    fn find(&self, selector: Selector) -> QueryResult<Self::Cursor> {
        self.find_with_options(selector, &FindOptions::default())
    }

    /// Finds documents matching the selector with the given options.
    fn find_with_options(
        &self,
        selector: Selector,
        find_options: &FindOptions,
    ) -> QueryResult<Self::Cursor>;
}

impl<T: FindProvider + ?Sized> FindProvider for &T {
    type Cursor = T::Cursor;

    fn find(&self, selector: Selector) -> QueryResult<Self::Cursor> {
        (**self).find(selector)
    }

    fn find_with_options(
        &self,
        selector: Selector,
        find_options: &FindOptions,
    ) -> QueryResult<Self::Cursor> {
        (**self).find_with_options(selector, find_options)
    }
}

impl<T: FindProvider + ?Sized> FindProvider for std::sync::Arc<T> {
    type Cursor = T::Cursor;

    fn find(&self, selector: Selector) -> QueryResult<Self::Cursor> {
        (**self).find(selector)
    }

    fn find_with_options(
        &self,
        selector: Selector,
        find_options: &FindOptions,
    ) -> QueryResult<Self::Cursor> {
        (**self).find_with_options(selector, find_options)
    }
}
