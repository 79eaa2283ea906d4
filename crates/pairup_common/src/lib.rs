// --- File: crates/pairup_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{external_service_error, HttpStatusCode, PairUpError};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, map_json_error, MessageBody};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
