use crate::collection::{FilteredCollection, FindProvider};
use crate::common::Value;
use crate::errors::{QueryError, QueryResult};
use crate::filter::{FilterRegistry, IntoFilterValue};

/// Builder for a [FilteredCollection] whose filters are known up front.
///
/// Registration errors are captured and returned by [FilteredCollectionBuilder::build];
/// after the first error, further registrations are ignored.
///
/// # Examples
///
/// ```rust
/// use query_builder::selector;
/// use query_builder::collection::{FilteredCollection, FindOptions, FindProvider};
/// use query_builder::common::Value;
/// use query_builder::errors::QueryResult;
/// use query_builder::selector::Selector;
///
/// struct Posts;
///
/// impl FindProvider for Posts {
///     type Cursor = ();
///
///     fn find_with_options(&self, _: Selector, _: &FindOptions) -> QueryResult<()> {
///         Ok(())
///     }
/// }
///
/// let posts = FilteredCollection::builder(Posts)
///     .default_filter("softDelete", selector! { deletedAt: null })
///     .optional_filter("published", selector! { published: true })
///     .filter_fn("byAuthor", false, |args: &[Value]| {
///         selector! { author: (args.first().cloned().unwrap_or_default()) }
///     })
///     .build()?;
///
/// assert_eq!(posts.get_filters().len(), 3);
/// # Ok::<(), query_builder::errors::QueryError>(())
/// ```
pub struct FilteredCollectionBuilder<C> {
    inner: C,
    registry: FilterRegistry,
    error: Option<QueryError>,
}

impl<C: FindProvider> FilteredCollectionBuilder<C> {
    pub fn new(inner: C) -> Self {
        FilteredCollectionBuilder {
            inner,
            registry: FilterRegistry::new(),
            error: None,
        }
    }

    /// Adds a filter that applies unless a query disables it.
    pub fn default_filter(self, name: &str, value: impl IntoFilterValue) -> Self {
        self.filter(name, true, value)
    }

    /// Adds a filter that applies only when a query enables it.
    pub fn optional_filter(self, name: &str, value: impl IntoFilterValue) -> Self {
        self.filter(name, false, value)
    }

    pub fn filter(mut self, name: &str, is_default: bool, value: impl IntoFilterValue) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.registry.register_filter(name, is_default, value) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Adds a computed filter.
    pub fn filter_fn<F, R>(self, name: &str, is_default: bool, f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        if self.error.is_none() {
            self.registry.register_filter_fn(name, is_default, f);
        }
        self
    }

    /// Finishes the collection, or returns the first registration error.
    pub fn build(self) -> QueryResult<FilteredCollection<C>> {
        match self.error {
            Some(e) => Err(e),
            None if self.registry.is_empty() => Ok(FilteredCollection::new(self.inner)),
            None => Ok(FilteredCollection::with_registry(self.inner, self.registry)),
        }
    }
}
