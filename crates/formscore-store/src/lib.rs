//! # formscore-store
//!
//! Store adapter traits for the FormScore auth core, plus in-memory
//! implementations backed by `DashMap`.
//!
//! The auth crate depends only on the traits; any persistence engine
//! can be plugged in behind them. The in-memory adapters serve as
//! single-node production stores and as test doubles.

pub mod memory;
pub mod traits;

pub use memory::{MemoryPermissionStore, MemorySessionStore, MemoryUserStore};
pub use traits::{PermissionFilter, PermissionStore, SessionStore, UserStore};
