//! # formscore-core
//!
//! Shared foundations for the FormScore authentication and authorization
//! core: the unified error type, configuration schemas, and the permission
//! `Scope` type.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use types::scope::Scope;
