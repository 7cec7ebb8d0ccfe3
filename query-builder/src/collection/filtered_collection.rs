use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::ops::Deref;

use crate::collection::{FilteredCollectionBuilder, FindOptions, FindProvider};
use crate::common::Value;
use crate::errors::QueryResult;
use crate::filter::{FilterDefinition, FilterRegistry, IntoFilterValue};
use crate::query::QueryBuilder;
use crate::selector::Selector;

/// A host collection with a slot for its named filters.
///
/// `FilteredCollection` wraps any [FindProvider] and owns the collection's
/// [FilterRegistry]. The registry is created on the first registration and
/// lives as long as the collection. Queries are started with
/// [FilteredCollection::query]; every query shares the registry but keeps its
/// own conditions and toggles.
///
/// The wrapper dereferences to the host collection, so the host's own API
/// stays available.
///
/// # Examples
///
/// ```rust
/// use query_builder::selector;
/// use query_builder::collection::{FilteredCollection, FindOptions, FindProvider};
/// use query_builder::errors::QueryResult;
/// use query_builder::selector::Selector;
///
/// struct Users;
///
/// impl FindProvider for Users {
///     type Cursor = Selector;
///
///     fn find_with_options(&self, selector: Selector, _: &FindOptions) -> QueryResult<Selector> {
///         Ok(selector)
///     }
/// }
///
/// let users = FilteredCollection::new(Users);
/// users.register_default_filters(vec![("softDelete", selector! { deletedAt: null })])?;
///
/// let mut query = users.query();
/// query.condition(selector! { name: "Max" })?;
/// assert_eq!(
///     query.execute()?,
///     selector! { "$and": [{ name: "Max" }, { deletedAt: null }] }
/// );
/// # Ok::<(), query_builder::errors::QueryError>(())
/// ```
pub struct FilteredCollection<C> {
    inner: C,
    registry: OnceCell<FilterRegistry>,
}

impl<C: FindProvider> FilteredCollection<C> {
    /// Wraps a host collection. No registry is attached until the first
    /// filter is registered.
    pub fn new(inner: C) -> Self {
        FilteredCollection {
            inner,
            registry: OnceCell::new(),
        }
    }

    /// Starts configuring a collection with its filters up front.
    pub fn builder(inner: C) -> FilteredCollectionBuilder<C> {
        FilteredCollectionBuilder::new(inner)
    }

    pub(crate) fn with_registry(inner: C, registry: FilterRegistry) -> Self {
        FilteredCollection {
            inner,
            registry: OnceCell::with_value(registry),
        }
    }

    /// Creates a new, empty query over this collection.
    pub fn query(&self) -> QueryBuilder<'_, C> {
        QueryBuilder::new(self)
    }

    /// Creates a new query seeded with one condition.
    ///
    /// # Errors
    ///
    /// Fails with [crate::errors::ErrorKind::InvalidConditionType] if the
    /// condition is not a string, an id or a selector.
    pub fn query_with(&self, condition: impl Into<Value>) -> QueryResult<QueryBuilder<'_, C>> {
        let mut query = QueryBuilder::new(self);
        query.condition(condition)?;
        Ok(query)
    }

    /// Registers a named filter, replacing a filter with the same name.
    ///
    /// # Errors
    ///
    /// Fails with [crate::errors::ErrorKind::InvalidFilterType] if `value`
    /// is not a selector or a function.
    pub fn register_filter(
        &self,
        name: &str,
        is_default: bool,
        value: impl IntoFilterValue,
    ) -> QueryResult<()> {
        self.attach_registry().register_filter(name, is_default, value)
    }

    /// Registers a computed filter.
    pub fn register_filter_fn<F, R>(&self, name: &str, is_default: bool, f: F)
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.attach_registry().register_filter_fn(name, is_default, f)
    }

    /// Registers every entry as a filter enabled by default.
    pub fn register_default_filters<I, K, V>(&self, filters: I) -> QueryResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoFilterValue,
    {
        self.attach_registry().register_default_filters(filters)
    }

    /// Registers every entry as a filter disabled by default.
    pub fn register_optional_filters<I, K, V>(&self, filters: I) -> QueryResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoFilterValue,
    {
        self.attach_registry().register_optional_filters(filters)
    }

    /// Returns a snapshot of the registered filters; empty if none were registered.
    pub fn get_filters(&self) -> IndexMap<String, FilterDefinition> {
        match self.registry.get() {
            Some(registry) => registry.get_filters(),
            None => IndexMap::new(),
        }
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.registry
            .get()
            .map(|registry| registry.contains(name))
            .unwrap_or(false)
    }

    /// The attached registry, if any filter was registered yet.
    pub fn filter_registry(&self) -> Option<&FilterRegistry> {
        self.registry.get()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn attach_registry(&self) -> &FilterRegistry {
        self.registry.get_or_init(|| {
            log::debug!("Attaching filter registry to collection");
            FilterRegistry::new()
        })
    }
}

impl<C> Deref for FilteredCollection<C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<C: FindProvider> FindProvider for FilteredCollection<C> {
    type Cursor = C::Cursor;

    fn find(&self, selector: Selector) -> QueryResult<Self::Cursor> {
        self.inner.find(selector)
    }

    fn find_with_options(
        &self,
        selector: Selector,
        find_options: &FindOptions,
    ) -> QueryResult<Self::Cursor> {
        self.inner.find_with_options(selector, find_options)
    }
}
