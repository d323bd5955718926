//! User account entities.

pub mod model;
pub mod status;

pub use model::User;
pub use status::UserStatus;
