use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, lowest precedence first: `config/default.*`, `config/{RUN_ENV}.*`,
/// `PAIRUP__SECTION__KEY` environment variables, and `PORT`. Values set to
/// `secret_from_env` are then resolved from the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let port_override = env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok());

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("auth.admin_emails"),
        )
        .set_override_option("server.port", port_override)?;

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Replaces every `secret_from_env` marker in the config with its environment value,
/// then checks that the required secrets resolved.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    env_vars::inject_env_vars(&mut json);
    let config: AppConfig = serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))?;
    validate_secrets(&config)?;
    Ok(config)
}

fn is_unresolved(value: &str) -> bool {
    value.trim().is_empty() || value == env_vars::SECRET_MARKER
}

/// Rejects secrets that are empty or still carry the `secret_from_env` marker.
pub fn validate_secrets(config: &AppConfig) -> Result<(), ConfigError> {
    if is_unresolved(&config.auth.access_token_secret) {
        return Err(ConfigError::Message(format!(
            "auth.access_token_secret is not set; export {}",
            env_vars::secret_path_to_env_var("auth.access_token_secret")
        )));
    }
    if config.use_stripe {
        if let Some(stripe) = &config.stripe {
            if is_unresolved(&stripe.secret_key) {
                return Err(ConfigError::Message(format!(
                    "stripe.secret_key is not set; export {}",
                    env_vars::secret_path_to_env_var("stripe.secret_key")
                )));
            }
        }
    }
    Ok(())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the process environment once.
///
/// The file is taken from `DOTENV_OVERRIDE`, else from a first command line
/// argument starting with `.env`, else `.env`. Returns the path used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
