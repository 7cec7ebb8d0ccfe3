//! Common types shared by selectors, filters and collections.
//!
//! - [`Value`] - the value model for selector fields and filter arguments
//! - [`ObjectId`] - an opaque document identifier
//! - [`SortOrder`] - sort direction used by [`crate::collection::FindOptions`]
//! - constants such as [`DOC_ID`] and [`AND_OPERATOR`]

mod constants;
mod object_id;
mod sort_order;
mod value;

pub use constants::*;
pub use object_id::*;
pub use sort_order::*;
pub use value::*;
