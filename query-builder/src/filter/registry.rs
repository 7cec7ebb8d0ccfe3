use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::common::Value;
use crate::errors::QueryResult;
use crate::filter::{FilterValue, IntoFilterValue};

/// A named filter stored in a [FilterRegistry].
#[derive(Clone, Debug)]
pub struct FilterDefinition {
    name: String,
    is_default: bool,
    value: FilterValue,
}

impl FilterDefinition {
    pub fn new(name: &str, is_default: bool, value: FilterValue) -> Self {
        FilterDefinition {
            name: name.to_string(),
            is_default,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the filter applies to queries that do not toggle it.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

/// The named filters of one collection.
///
/// Filters are keyed by name. Registering a name again replaces the previous
/// definition, which keeps its position in the iteration order. Iteration
/// follows first registration order, so building the same query twice always
/// produces the same selector.
///
/// Clones share the same underlying map.
///
/// # Examples
///
/// ```rust
/// use query_builder::selector;
/// use query_builder::common::Value;
/// use query_builder::filter::FilterRegistry;
///
/// let registry = FilterRegistry::new();
/// registry.register_filter("softDelete", true, selector! { deletedAt: null }).unwrap();
/// registry.register_filter_fn("owner", false, |args: &[Value]| {
///     selector! { owner: (args.first().cloned().unwrap_or_default()) }
/// });
///
/// assert_eq!(registry.len(), 2);
/// assert!(registry.get_filter("softDelete").unwrap().is_default());
/// ```
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: Arc<RwLock<IndexMap<String, FilterDefinition>>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        FilterRegistry {
            filters: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Registers a filter, replacing any filter with the same name.
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
        let value = value.into_filter_value()?;
        self.insert(FilterDefinition::new(name, is_default, value));
        Ok(())
    }

    /// Registers a computed filter.
    pub fn register_filter_fn<F, R>(&self, name: &str, is_default: bool, f: F)
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.insert(FilterDefinition::new(name, is_default, FilterValue::computed(f)));
    }

    /// Registers every entry as a default filter, in iteration order.
    ///
    /// Stops at the first invalid entry; entries before it stay registered.
    pub fn register_default_filters<I, K, V>(&self, filters: I) -> QueryResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoFilterValue,
    {
        for (name, value) in filters {
            self.register_filter(name.as_ref(), true, value)?;
        }
        Ok(())
    }

    /// Registers every entry as an optional filter, in iteration order.
    ///
    /// Stops at the first invalid entry; entries before it stay registered.
    pub fn register_optional_filters<I, K, V>(&self, filters: I) -> QueryResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoFilterValue,
    {
        for (name, value) in filters {
            self.register_filter(name.as_ref(), false, value)?;
        }
        Ok(())
    }

    /// Returns a snapshot of all filters in registration order.
    pub fn get_filters(&self) -> IndexMap<String, FilterDefinition> {
        self.filters.read().clone()
    }

    pub fn get_filter(&self, name: &str) -> Option<FilterDefinition> {
        self.filters.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.read().is_empty()
    }

    fn insert(&self, definition: FilterDefinition) {
        let mut filters = self.filters.write();
        let name = definition.name().to_string();
        if filters.insert(name.clone(), definition).is_some() {
            log::debug!("Filter {} has been overwritten", name);
        }
    }
}
