//! # formscore-entity
//!
//! Domain entity models shared across the FormScore auth core.
//!
//! ## Modules
//!
//! - `user` — registered users and account status
//! - `permission` — scoped permission grants and the level hierarchy
//! - `session` — refresh-token session records

pub mod permission;
pub mod session;
pub mod user;

pub use permission::{GrantPermission, Grantor, PermissionGrant, PermissionLevel};
pub use session::Session;
pub use user::{User, UserStatus};
