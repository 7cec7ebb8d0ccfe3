use crate::common::SortOrder;

/// Options passed through to a collection's find.
///
/// The query builder never interprets these; they are handed unchanged to
/// [`crate::collection::FindProvider::find_with_options`].
///
/// # Examples
///
/// ```rust
/// use query_builder::collection::{limit_to, FindOptions};
/// use query_builder::common::SortOrder;
///
/// let options = FindOptions::new()
///     .sort_by("age", SortOrder::Descending)
///     .skip(10)
///     .limit(20);
/// assert_eq!(options.skip_count(), Some(10));
///
/// let options = limit_to(100);
/// assert_eq!(options.limit_count(), Some(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    sort_by: Vec<(String, SortOrder)>,
    skip: Option<u64>,
    limit: Option<u64>,
    distinct: bool,
}

/// Creates `FindOptions` sorted by a field.
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions::new().sort_by(field_name, sort_order)
}

/// Creates `FindOptions` that skips the first `skip` results.
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions::new().skip(skip)
}

/// Creates `FindOptions` that returns at most `limit` results.
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions::new().limit(limit)
}

/// Creates `FindOptions` that returns only distinct documents.
pub fn distinct() -> FindOptions {
    FindOptions::new().distinct()
}

impl FindOptions {
    pub fn new() -> FindOptions {
        FindOptions {
            sort_by: Vec::new(),
            skip: None,
            limit: None,
            distinct: false,
        }
    }

    pub fn skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }

    /// Adds a sort field. Fields are applied in the order they were added;
    /// sorting by the same field again replaces its order.
    pub fn sort_by(mut self, field_name: &str, sort_order: SortOrder) -> FindOptions {
        match self.sort_by.iter_mut().find(|(name, _)| name == field_name) {
            Some(entry) => entry.1 = sort_order,
            None => self.sort_by.push((field_name.to_string(), sort_order)),
        }
        self
    }

    pub fn distinct(mut self) -> FindOptions {
        self.distinct = true;
        self
    }

    pub fn sort_fields(&self) -> &[(String, SortOrder)] {
        &self.sort_by
    }

    pub fn skip_count(&self) -> Option<u64> {
        self.skip
    }

    pub fn limit_count(&self) -> Option<u64> {
        self.limit
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }
}
