//! Named, reusable filters attached to a collection.
//!
//! A filter is a named condition contributor stored in a [`FilterRegistry`].
//! Its value is either a fixed selector or a function of the arguments given
//! on the query ([`FilterValue`]). Default filters apply to every query unless
//! the query disables them; optional filters apply only when a query enables
//! them. The per-query override is a [`FilterToggle`].
//!
//! # Examples
//!
//! ```rust
//! use query_builder::selector;
//! use query_builder::common::Value;
//! use query_builder::filter::{FilterRegistry, FilterValue};
//!
//! let registry = FilterRegistry::new();
//! registry.register_default_filters(vec![("softDelete", selector! { deletedAt: null })])?;
//! registry.register_optional_filters(vec![
//!     ("onlyOwn", FilterValue::from(selector! { owner: "me" })),
//!     ("olderThan", FilterValue::computed(|args: &[Value]| {
//!         selector! { age: { "$gt": (args.first().cloned().unwrap_or_default()) } }
//!     })),
//! ])?;
//! # Ok::<(), query_builder::errors::QueryError>(())
//! ```

mod filter_value;
mod registry;
mod toggle;

pub use filter_value::*;
pub use registry::*;
pub use toggle::*;
