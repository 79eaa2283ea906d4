// --- File: crates/services/pairup_backend/src/app_state.rs ---
use pairup_common::services::PaymentService;
use pairup_config::AppConfig;
use pairup_db::DocumentStore;
use pairup_stripe::StripeError;
use std::sync::Arc;

/// Application state shared across all routes.
///
/// Built once at startup; the store wraps the only connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: DocumentStore,
    /// Payment processor, present when Stripe is enabled and configured.
    pub payments: Option<Arc<dyn PaymentService<Error = StripeError>>>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, store: DocumentStore) -> Self {
        Self {
            config,
            store,
            payments: None,
        }
    }

    pub fn with_payments(mut self, payments: Arc<dyn PaymentService<Error = StripeError>>) -> Self {
        self.payments = Some(payments);
        self
    }

    /// Currency charged for payment intents.
    pub fn currency(&self) -> String {
        self.config
            .stripe
            .as_ref()
            .map(|stripe| stripe.currency.clone())
            .unwrap_or_else(|| "usd".to_string())
    }
}
