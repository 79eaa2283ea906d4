// --- File: crates/pairup_stripe/src/lib.rs ---

pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

// Re-export for main backend
pub use error::StripeError;
pub use handlers::StripeState;
pub use logic::{to_minor_units, CreatePaymentIntentRequest, CreatePaymentIntentResponse};
pub use routes::{routes, stripe_routes};
pub use service::StripePaymentService;
