//! Scoped role-based access control.

pub mod evaluator;

pub use evaluator::RbacEvaluator;
