// File: services/pairup_backend/src/main.rs
use pairup_backend::{build_router, AppState};
use pairup_config::{ensure_dotenv_loaded, load_config};
use pairup_db::{DbClient, DocumentStore};
use pairup_stripe::StripePaymentService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ensure_dotenv_loaded();
    pairup_common::logging::init();
    let config = Arc::new(load_config()?);

    let client = DbClient::new(&config).await?;
    let store = DocumentStore::new(client);
    store.init_schema().await?;

    let mut state = AppState::new(config.clone(), store);
    if config.use_stripe {
        match config.stripe.clone() {
            Some(stripe) => {
                state = state.with_payments(Arc::new(StripePaymentService::new(stripe)));
            }
            None => warn!("use_stripe is set but the stripe section is missing"),
        }
    }

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
