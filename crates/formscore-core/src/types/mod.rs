//! Shared core types.

pub mod scope;

pub use scope::Scope;
