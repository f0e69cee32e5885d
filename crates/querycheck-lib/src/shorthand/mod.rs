//! Shorthand query compiler.

mod expand;
mod sort;
mod verb;

#[cfg(test)]
mod sort_tests;

pub use expand::{Expansion, ShorthandCall, expand};
pub use sort::{Direction, SortCall, SortChain, SortColumn};
pub use verb::{UnknownVerb, Verb};
