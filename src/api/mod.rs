//! Purpose: Define the stable public Rust API boundary for underline.
//! Exports: Every combinator, the traversal/lookup capabilities, range config, and errors.
//! Role: Public, additive-only surface; callers import from here rather than `core`.
//! Invariants: Operations are free functions with no shared state between calls.
//! Invariants: Re-exports only; no logic lives in this module.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::combinators::{
    Nest, Nested, any, compact, contains, every, filter, flatten, map, none, pluck, reject, sum,
    sum_numbers, times, unique,
};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::helpers::{Truthy, identity, is_object, property};
pub use crate::core::object::{bind, extend, values, without};
pub use crate::core::path::{Lookup, Path, get};
pub use crate::core::range::{RangeSpec, range};
pub use crate::core::reduce::{reduce, try_reduce};
pub use crate::core::traverse::{Collection, Key, Traverse, each, keys, try_each};
