pub mod analyzer;
pub mod check;
pub mod dump;
pub mod expand;
pub mod loader;

#[cfg(test)]
mod expand_tests;
