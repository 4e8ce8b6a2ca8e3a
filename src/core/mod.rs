/*!

The machinery behind the public element API: the hash-consing element tables, construction and parsing of elements,
evaluation with its caches, and the graph algorithms evaluation relies on.

*/

mod element_table;
mod error;
mod graph;
mod parse;
mod evaluate;
pub mod cache;
pub mod factory;

pub use error::{Error, Result};
pub use cache::DenotationsCaches;
pub use factory::ElementFactory;
