//! Per-query composition of conditions and filters.
//!
//! See [`QueryBuilder`] for how explicit conditions, default filters and
//! toggled filters are merged into one selector.

mod query_builder;

pub use query_builder::*;
