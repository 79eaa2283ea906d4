// --- File: crates/pairup_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/pairup.db, overridable via PAIRUP__DATABASE__URL
}

// --- Auth Config ---
// The signing secret is usually "secret_from_env" in the config file and is
// resolved from PAIRUP_SECRET_AUTH_ACCESS_TOKEN_SECRET or ACCESS_TOKEN_SECRET.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub access_token_secret: String,
    /// Lifetime of issued bearer tokens in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    /// Callers treated as admins even when their stored role says otherwise.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

fn default_token_ttl_secs() -> i64 {
    3600
}

// --- Stripe Config ---
// Secret key resolved from PAIRUP_SECRET_STRIPE_SECRET_KEY or STRIPE_SECRET_KEY.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Base URL of the Stripe REST API; tests point this at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_api_base() -> String {
    "https://api.stripe.com".to_string()
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_stripe: bool,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
}
