// --- File: crates/pairup_biodata/src/lib.rs ---

pub mod admin;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;

// Re-export for main backend
pub use error::BiodataError;
pub use handlers::BiodataState;
pub use models::{AdminStats, Role, Status, ALREADY_ADDED, USER_EXISTS};
pub use routes::routes;
