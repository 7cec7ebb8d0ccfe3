//! The host collection boundary.
//!
//! The query builder does not run queries itself. A host collection exposes
//! its find through [`FindProvider`], and [`FilteredCollection`] wraps it
//! with a slot holding the collection's named filters.
//!
//! ```rust,ignore
//! let users = FilteredCollection::builder(host_collection)
//!     .default_filter("softDelete", selector! { deletedAt: null })
//!     .build()?;
//!
//! let cursor = users.query_with("someId")?.execute_with_options(&limit_to(1))?;
//! ```

mod collection_builder;
mod filtered_collection;
mod find_options;
mod find_provider;

pub use collection_builder::*;
pub use filtered_collection::*;
pub use find_options::*;
pub use find_provider::*;
