// Core modules: traversal, reduction, derived combinators, and error modeling.
pub mod combinators;
pub mod error;
pub mod helpers;
pub mod object;
pub mod path;
pub mod range;
pub mod reduce;
pub mod traverse;
