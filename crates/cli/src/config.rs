//! CLI configuration utilities

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use fitcoach_session::AuthConfig;
use fitcoach_session::config::{DEFAULT_CALLBACK_PATH, DEFAULT_SCOPES};
use std::path::Path;

/// Environment variable prefix, e.g. `FITCOACH_CLIENT_ID`
pub const ENV_PREFIX: &str = "FITCOACH";

/// Load the auth configuration
///
/// Sources, lowest precedence first: built-in defaults, the config file
/// (`<state dir>/config.toml` unless given explicitly, where it must exist),
/// then `FITCOACH_*` environment variables.
pub fn load_auth_config(explicit: Option<&Path>, state_dir: &Path) -> Result<AuthConfig> {
    let mut builder = Config::builder()
        .set_default("scopes", DEFAULT_SCOPES)?
        .set_default("callback_path", DEFAULT_CALLBACK_PATH)?;

    builder = match explicit {
        Some(path) => builder.add_source(File::from(path)),
        None => builder.add_source(File::from(state_dir.join("config.toml")).required(false)),
    };

    let settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()
        .context("Failed to read configuration")?;

    settings
        .try_deserialize()
        .context("Incomplete configuration: domain, client_id, redirect_uri and api_base_url are required")
}
