use indexmap::IndexMap;

use crate::collection::{FilteredCollection, FindOptions, FindProvider};
use crate::common::Value;
use crate::errors::QueryResult;
use crate::filter::FilterToggle;
use crate::selector::{normalize_condition, require_condition, Selector};

/// Builds the selector of a single query.
///
/// A query holds explicit conditions and per-query filter toggles. When built,
/// it combines them with the collection's named filters:
///
/// 1. explicit conditions first, in the order they were added
/// 2. then every active filter, in registration order. A filter is active
///    when the query toggled it on, or when it is a default filter the query
///    did not toggle off
///
/// No condition produces `{}`, a single condition is returned as is, and two
/// or more are combined as `{ "$and": [..] }`.
///
/// A query borrows its collection and is meant to be dropped after use. Toggles
/// set on one query never affect another query of the same collection.
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
/// struct Users;
///
/// impl FindProvider for Users {
///     type Cursor = ();
///
///     fn find_with_options(&self, _: Selector, _: &FindOptions) -> QueryResult<()> {
///         Ok(())
///     }
/// }
///
/// let users = FilteredCollection::new(Users);
/// users.register_default_filters(vec![("softDelete", selector! { deletedAt: null })])?;
/// users.register_filter_fn("callback", false, |args: &[Value]| {
///     selector! { parameter: (args.first().cloned().unwrap_or_default()) }
/// });
///
/// let mut query = users.query();
/// query
///     .filter("softDelete", false)
///     .filter_with_args("callback", true, vec!["parameter"])?;
///
/// assert_eq!(query.build(), selector! { parameter: "parameter" });
/// # Ok::<(), query_builder::errors::QueryError>(())
/// ```
pub struct QueryBuilder<'a, C> {
    collection: &'a FilteredCollection<C>,
    conditions: Vec<Selector>,
    toggles: IndexMap<String, FilterToggle>,
}

impl<'a, C: FindProvider> QueryBuilder<'a, C> {
    /// Creates an empty query over `collection`.
    pub fn new(collection: &'a FilteredCollection<C>) -> Self {
        QueryBuilder {
            collection,
            conditions: Vec::new(),
            toggles: IndexMap::new(),
        }
    }

    /// Adds an explicit condition.
    ///
    /// A string or [crate::common::ObjectId] is a shorthand for
    /// `{ "_id": value }`; a selector is added as is.
    ///
    /// # Errors
    ///
    /// Fails with [crate::errors::ErrorKind::InvalidConditionType] for any
    /// other value. The query is left unchanged.
    pub fn condition(&mut self, condition: impl Into<Value>) -> QueryResult<&mut Self> {
        let selector = require_condition(condition.into())?;
        self.conditions.push(selector);
        Ok(self)
    }

    /// Enables or disables a filter for this query, without arguments.
    ///
    /// Toggling a name the collection does not know logs a warning; the
    /// toggle is kept but has no effect.
    pub fn filter(&mut self, name: &str, enable: bool) -> &mut Self {
        let toggle = if enable {
            FilterToggle::enabled()
        } else {
            FilterToggle::disabled()
        };
        self.set_toggle(name, toggle);
        self
    }

    /// Enables or disables a filter and sets the arguments its function is
    /// called with.
    ///
    /// # Errors
    ///
    /// Fails with [crate::errors::ErrorKind::InvalidArgumentType] if `args`
    /// is not an array (`null` counts as no arguments).
    pub fn filter_with_args(
        &mut self,
        name: &str,
        enable: bool,
        args: impl Into<Value>,
    ) -> QueryResult<&mut Self> {
        let toggle = FilterToggle::with_args(enable, args.into())?;
        self.set_toggle(name, toggle);
        Ok(self)
    }

    /// Toggles a filter with a single modifier: a bool enables or disables
    /// it, an array enables it with those arguments and `null` disables it.
    ///
    /// # Errors
    ///
    /// Fails with [crate::errors::ErrorKind::InvalidArgumentType] for any
    /// other modifier.
    pub fn toggle(&mut self, name: &str, modifier: impl Into<Value>) -> QueryResult<&mut Self> {
        let toggle = FilterToggle::from_modifier(modifier.into())?;
        self.set_toggle(name, toggle);
        Ok(self)
    }

    /// The explicit conditions, in insertion order.
    pub fn conditions(&self) -> &[Selector] {
        &self.conditions
    }

    /// The toggles set on this query, including those for unknown filters.
    pub fn toggles(&self) -> &IndexMap<String, FilterToggle> {
        &self.toggles
    }

    /// Whether the named filter would contribute to this query if built now.
    pub fn is_filter_active(&self, name: &str) -> bool {
        let definition = self
            .collection
            .filter_registry()
            .and_then(|registry| registry.get_filter(name));

        match definition {
            Some(definition) => match self.toggles.get(name) {
                Some(toggle) => toggle.is_enabled(),
                None => definition.is_default(),
            },
            None => false,
        }
    }

    /// Builds the selector. Building has no side effects and can be repeated.
    pub fn build(&self) -> Selector {
        let mut conditions = self.conditions.clone();

        if let Some(registry) = self.collection.filter_registry() {
            for (name, definition) in registry.get_filters() {
                let toggle = self.toggles.get(&name);
                let active = match toggle {
                    Some(toggle) => toggle.is_enabled(),
                    None => definition.is_default(),
                };
                if !active {
                    continue;
                }

                let args = toggle.map(|t| t.args()).unwrap_or(&[]);
                let raw = definition.value().resolve(args);
                match normalize_condition(raw) {
                    Some(condition) => conditions.push(condition),
                    None => {
                        log::debug!("Filter {} produced no condition, skipping it", name);
                    }
                }
            }
        }

        match conditions.len() {
            0 => Selector::new(),
            1 => conditions.remove(0),
            _ => Selector::and(conditions),
        }
    }

    /// Builds the selector and runs it on the collection.
    pub fn execute(&self) -> QueryResult<C::Cursor> {
        let selector = self.build();
        log::debug!("Executing query {}", selector);
        self.collection.find(selector)
    }

    /// Builds the selector and runs it on the collection with `find_options`.
    pub fn execute_with_options(&self, find_options: &FindOptions) -> QueryResult<C::Cursor> {
        let selector = self.build();
        log::debug!("Executing query {}", selector);
        self.collection.find_with_options(selector, find_options)
    }

    fn set_toggle(&mut self, name: &str, toggle: FilterToggle) {
        if !self.collection.has_filter(name) {
            log::warn!("Filter {} does not exist", name);
        }
        self.toggles.insert(name.to_string(), toggle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ObjectId;
    use crate::errors::ErrorKind;
    use crate::filter::FilterValue;
    use crate::selector;
    use crate::test_util::RecordingCollection;

    // Setup only one time throughout the crate tests.
    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    fn soft_delete_collection() -> FilteredCollection<RecordingCollection> {
        let collection = FilteredCollection::new(RecordingCollection::new());
        collection
            .register_default_filters(vec![("softDelete", selector! { deletedAt: null })])
            .unwrap();
        collection
    }

    fn full_collection() -> FilteredCollection<RecordingCollection> {
        let collection = soft_delete_collection();
        collection
            .register_optional_filters(vec![
                ("onlyOwn", FilterValue::from(selector! { owner: "current-user" })),
                (
                    "callback",
                    FilterValue::computed(|args: &[Value]| {
                        selector! { parameter: (args.first().cloned().unwrap_or_default()) }
                    }),
                ),
            ])
            .unwrap();
        collection
    }

    #[test]
    fn test_no_conditions_no_filters_builds_empty_selector() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        assert_eq!(collection.query().build(), Selector::new());
    }

    #[test]
    fn test_single_condition_is_unwrapped() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        let mut query = collection.query();
        query.condition(selector! { _id: "someId" }).unwrap();
        assert_eq!(query.build(), selector! { _id: "someId" });
    }

    #[test]
    fn test_many_conditions_are_combined_in_order() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        let mut query = collection.query();
        query
            .condition(selector! { a: 1 })
            .unwrap()
            .condition(selector! { b: 2 })
            .unwrap()
            .condition("c")
            .unwrap();

        assert_eq!(
            query.build(),
            selector! { "$and": [{ a: 1 }, { b: 2 }, { _id: "c" }] }
        );
    }

    #[test]
    fn test_identifier_condition() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        let id = ObjectId::new();
        let mut query = collection.query();
        query.condition(id).unwrap();
        assert_eq!(query.build(), selector! { _id: (id) });
    }

    #[test]
    fn test_invalid_condition_is_rejected() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        let mut query = collection.query();
        for bad in [Value::Null, Value::from(1), Value::from(true), Value::from(vec![1])] {
            let err = query.condition(bad).err().unwrap();
            assert_eq!(err.kind(), &ErrorKind::InvalidConditionType);
        }
        assert!(query.conditions().is_empty());
    }

    #[test]
    fn test_default_filter_comes_after_conditions() {
        let collection = soft_delete_collection();
        let mut query = collection.query();
        query.condition(selector! { _id: "X" }).unwrap();
        assert_eq!(
            query.build(),
            selector! { "$and": [{ _id: "X" }, { deletedAt: null }] }
        );

        let mut query = collection.query();
        query.condition(selector! { name: "Max" }).unwrap();
        assert_eq!(
            query.build(),
            selector! { "$and": [{ name: "Max" }, { deletedAt: null }] }
        );
    }

    #[test]
    fn test_only_default_filter_is_unwrapped() {
        let collection = full_collection();
        assert_eq!(collection.query().build(), selector! { deletedAt: null });
    }

    #[test]
    fn test_enable_and_disable_filters() {
        let collection = full_collection();
        let mut query = collection.query();

        query.filter("onlyOwn", true);
        assert_eq!(
            query.build(),
            selector! { "$and": [{ deletedAt: null }, { owner: "current-user" }] }
        );

        query.filter("softDelete", false);
        assert_eq!(query.build(), selector! { owner: "current-user" });

        query
            .filter_with_args("callback", true, vec!["parameter"])
            .unwrap();
        assert_eq!(
            query.build(),
            selector! { "$and": [{ owner: "current-user" }, { parameter: "parameter" }] }
        );
    }

    #[test]
    fn test_enabling_default_filter_is_a_no_op() {
        let collection = soft_delete_collection();
        let mut query = collection.query();
        query.filter("softDelete", true);
        assert_eq!(query.build(), selector! { deletedAt: null });
    }

    #[test]
    fn test_toggle_overwrites_previous_toggle() {
        let collection = full_collection();
        let mut query = collection.query();
        query.filter("onlyOwn", true).filter("onlyOwn", false);
        assert_eq!(query.build(), selector! { deletedAt: null });
        assert_eq!(query.toggles().len(), 1);
    }

    #[test]
    fn test_invalid_args_are_rejected() {
        let collection = full_collection();
        let mut query = collection.query();
        let err = query
            .filter_with_args("callback", true, "parameter")
            .err()
            .unwrap();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgumentType);
        assert!(query.toggles().is_empty());
    }

    #[test]
    fn test_null_args_mean_no_args() {
        let collection = full_collection();
        let mut query = collection.query();
        query.filter("softDelete", false);
        query.filter_with_args("callback", true, Value::Null).unwrap();
        assert_eq!(query.build(), selector! { parameter: null });
    }

    #[test]
    fn test_computed_filter_without_toggle_args_gets_empty_args() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        collection.register_filter_fn("argCount", true, |args: &[Value]| {
            selector! { count: (args.len() as i64) }
        });
        assert_eq!(collection.query().build(), selector! { count: 0 });
    }

    #[test]
    fn test_computed_filter_without_condition_is_dropped() {
        let collection = soft_delete_collection();
        collection.register_filter_fn("nothing", true, |_: &[Value]| Value::Null);
        collection.register_filter_fn("number", true, |_: &[Value]| 7);

        let mut query = collection.query();
        query.condition("someId").unwrap();
        assert_eq!(
            query.build(),
            selector! { "$and": [{ _id: "someId" }, { deletedAt: null }] }
        );
    }

    #[test]
    fn test_computed_filter_can_return_identifier() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        collection.register_filter_fn("byId", false, |args: &[Value]| {
            args.first().cloned().unwrap_or_default()
        });
        let mut query = collection.query();
        query.filter_with_args("byId", true, vec!["abc"]).unwrap();
        assert_eq!(query.build(), selector! { _id: "abc" });
    }

    #[test]
    fn test_unknown_filter_is_stored_but_ignored() {
        let collection = soft_delete_collection();
        let mut query = collection.query();
        query.filter("doesNotExist", true);

        assert!(query.toggles().contains_key("doesNotExist"));
        assert!(!query.is_filter_active("doesNotExist"));
        assert_eq!(query.build(), selector! { deletedAt: null });
    }

    #[test]
    fn test_toggle_registered_later_takes_effect() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        let mut query = collection.query();
        query.filter("late", true);
        collection
            .register_filter("late", false, selector! { late: true })
            .unwrap();
        assert_eq!(query.build(), selector! { late: true });
    }

    #[test]
    fn test_queries_are_isolated() {
        let collection = full_collection();
        let mut first = collection.query();
        first.filter("softDelete", false).filter("onlyOwn", true);

        let second = collection.query();
        assert_eq!(second.build(), selector! { deletedAt: null });
        assert_eq!(first.build(), selector! { owner: "current-user" });
    }

    #[test]
    fn test_re_registered_filter_is_used() {
        let collection = soft_delete_collection();
        collection
            .register_filter("softDelete", true, selector! { removed: false })
            .unwrap();
        assert_eq!(collection.query().build(), selector! { removed: false });
    }

    #[test]
    fn test_build_is_repeatable() {
        let collection = full_collection();
        let mut query = collection.query();
        query.condition("a").unwrap();
        query.filter("onlyOwn", true);
        assert_eq!(query.build(), query.build());
        assert_eq!(query.conditions().len(), 1);
    }

    #[test]
    fn test_modifier_toggle() {
        let collection = full_collection();
        let mut query = collection.query();
        query.toggle("softDelete", false).unwrap();
        query.toggle("callback", vec!["parameter"]).unwrap();
        assert_eq!(query.build(), selector! { parameter: "parameter" });

        query.toggle("callback", Value::Null).unwrap();
        assert_eq!(query.build(), Selector::new());

        let err = query.toggle("callback", 1).err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::InvalidArgumentType);
    }

    #[test]
    fn test_is_filter_active() {
        let collection = full_collection();
        let mut query = collection.query();
        assert!(query.is_filter_active("softDelete"));
        assert!(!query.is_filter_active("onlyOwn"));

        query.filter("softDelete", false).filter("onlyOwn", true);
        assert!(!query.is_filter_active("softDelete"));
        assert!(query.is_filter_active("onlyOwn"));
    }

    #[test]
    fn test_execute_passes_selector_to_collection() {
        let collection = soft_delete_collection();
        let mut query = collection.query();
        query.condition(selector! { name: "Max" }).unwrap();

        let result = query.execute().unwrap();
        assert_eq!(result, 1);
        assert_eq!(
            collection.last_selector(),
            Some(selector! { "$and": [{ name: "Max" }, { deletedAt: null }] })
        );
        assert_eq!(collection.last_options(), Some(FindOptions::default()));
    }

    #[test]
    fn test_execute_after_disable_drops_filter() {
        let collection = soft_delete_collection();
        let mut query = collection.query();
        query.execute().unwrap();
        assert_eq!(collection.last_selector(), Some(selector! { deletedAt: null }));

        query.filter("softDelete", false);
        query.execute().unwrap();
        assert_eq!(collection.last_selector(), Some(Selector::new()));
        assert_eq!(collection.call_count(), 2);
    }

    #[test]
    fn test_execute_with_options_passes_options_through() {
        let collection = FilteredCollection::new(RecordingCollection::new());
        let options = FindOptions::new().skip(5).limit(10);
        collection.query().execute_with_options(&options).unwrap();
        assert_eq!(collection.last_options(), Some(options));
        assert_eq!(collection.last_selector(), Some(Selector::new()));
    }
}
