//! Store adapter traits.
//!
//! Async traits over the entity models. Implementations must provide
//! atomic single-row updates; cross-row consistency is the caller's
//! concern (last-writer-wins).

pub mod permission;
pub mod session;
pub mod user;

pub use permission::{PermissionFilter, PermissionStore};
pub use session::SessionStore;
pub use user::UserStore;
