//! In-memory store implementations.
//!
//! `DashMap`-backed adapters keyed by entity id. Suitable for
//! single-node deployments and as test doubles.

pub mod permission;
pub mod session;
pub mod user;

pub use permission::MemoryPermissionStore;
pub use session::MemorySessionStore;
pub use user::MemoryUserStore;
