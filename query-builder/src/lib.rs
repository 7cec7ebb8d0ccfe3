//! # query_builder - reusable filters for document collection queries
//!
//! `query_builder` sits on top of a document collection's `find` and helps
//! composing selectors. A collection carries named *filters*: fixed selectors
//! or functions that compute a selector from arguments. Each query combines
//! its own explicit conditions with the filters it enables, and the defaults
//! it does not disable.
//!
//! ## Quick Start
//!
//! ```rust
//! use query_builder::selector;
//! use query_builder::collection::{FilteredCollection, FindOptions, FindProvider};
//! use query_builder::common::Value;
//! use query_builder::errors::QueryResult;
//! use query_builder::selector::Selector;
//!
//! // the host collection only needs to run a selector
//! struct Users;
//!
//! impl FindProvider for Users {
//!     type Cursor = Selector;
//!
//!     fn find_with_options(&self, selector: Selector, _: &FindOptions) -> QueryResult<Selector> {
//!         Ok(selector)
//!     }
//! }
//!
//! # fn main() -> QueryResult<()> {
//! let users = FilteredCollection::builder(Users)
//!     .default_filter("softDelete", selector! { deletedAt: null })
//!     .optional_filter("onlyAdmins", selector! { role: "admin" })
//!     .filter_fn("olderThan", false, |args: &[Value]| {
//!         selector! { age: { "$gt": (args.first().cloned().unwrap_or_default()) } }
//!     })
//!     .build()?;
//!
//! let mut query = users.query();
//! query
//!     .condition(selector! { name: "Max" })?
//!     .filter("onlyAdmins", true)
//!     .filter_with_args("olderThan", true, vec![30])?;
//!
//! assert_eq!(
//!     query.execute()?,
//!     selector! {
//!         "$and": [
//!             { name: "Max" },
//!             { deletedAt: null },
//!             { role: "admin" },
//!             { age: { "$gt": 30 } }
//!         ]
//!     }
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - the host find capability and the filter attachment point
//! - [`common`] - values, identifiers, constants
//! - [`errors`] - error types and result definitions
//! - [`filter`] - named filters, the filter registry and toggles
//! - [`query`] - the per-query builder
//! - [`selector`] - selectors and condition normalization

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod query;
pub mod selector;

#[cfg(test)]
pub(crate) mod test_util;
