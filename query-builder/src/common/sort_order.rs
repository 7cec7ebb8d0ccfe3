/// Specifies the direction for sorting the documents returned by a find.
///
/// Used with [`crate::collection::order_by`] and
/// [`crate::collection::FindOptions::sort_by`]:
/// ```text
/// let options = order_by("age", SortOrder::Descending);
/// let cursor = query.execute_with_options(&options)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    /// Smallest to largest
    Ascending,
    /// Largest to smallest
    Descending,
}
