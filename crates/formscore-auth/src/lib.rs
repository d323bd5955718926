//! # formscore-auth
//!
//! Authentication and authorization core for the FormScore platform.
//!
//! ## Modules
//!
//! - `password` — bcrypt hashing, work-factor migration, policy validation
//! - `token` — JWT access/refresh issuance and verification with
//!   server-side session records
//! - `rbac` — scoped permission evaluation and grant management
//! - `session` — account flows (register, login, refresh, logout) and
//!   session cleanup
//! - `gateway` — bearer-token authentication and permission guards

pub mod gateway;
pub mod password;
pub mod rbac;
pub mod session;
pub mod token;

pub use gateway::{AuthGateway, AuthenticatedUser};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RbacEvaluator;
pub use session::{LoginResult, SessionCleanup, SessionManager};
pub use token::{Claims, IssuedToken, TokenError, TokenIssuer, TokenType, TokenVerifier};
