//! Menu tree module
//!
//! - [`tree`] - navigation and mutation of a restaurant aggregate
//! - [`query`] - flatten, index, search and count

pub mod query;
pub mod tree;

pub use query::{category_index, count_dishes, flatten_dishes, matches_term, search_dishes};
pub use tree::{MenuError, NewDish};
