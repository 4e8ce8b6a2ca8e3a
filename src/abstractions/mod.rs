/*!

Types/type aliases that abstract over the implementing backing type.

A motivating example is `NatSet`, a set of small natural numbers used for every denotation in the library. A number
of external crates could provide this functionality. This module redirects to whatever implementation we want, so the
rest of the code base never names the backing crate directly.

*/

mod nat_set;
mod string_join;

// Logging
pub mod log;

// A set of natural numbers
pub use nat_set::NatSet;

// Interned string.
pub use string_cache::DefaultAtom as IString;

// Join sequences with a separator
pub use string_join::{join_iter, join_string};

// Hashing containers used throughout
pub use std::collections::{HashMap, HashSet};
