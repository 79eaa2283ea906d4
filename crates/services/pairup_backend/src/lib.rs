// --- File: crates/services/pairup_backend/src/lib.rs ---

pub mod app_state;
pub mod router;

pub use app_state::AppState;
pub use router::build_router;
