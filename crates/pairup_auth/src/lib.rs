// --- File: crates/pairup_auth/src/lib.rs ---

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod token;

pub use error::AuthError;
pub use middleware::{forbidden_access, require_bearer, AuthState, FORBIDDEN_ACCESS};
pub use routes::routes;
pub use token::{issue, verify, Identity};
