//! Layered configuration loader: base file, optional local override, environment

use super::Config;
use super::validation::validate_config;
use crate::error::Result;
use config::{Environment, File};
use std::path::Path;
use tracing::debug;

/// Section name of the provider settings, also the prefix of their
/// environment overrides, e.g. `AzureOpenAISettings__Endpoint`
pub const SETTINGS_SECTION: &str = "AzureOpenAISettings";

/// Prefix for the remaining environment overrides, e.g. `CHAT_API__SERVER__PORT`
pub const ENV_PREFIX: &str = "CHAT_API";

/// Load configuration from the base file, then the optional local override,
/// then environment variables. Later sources win.
pub fn load_layered<B: AsRef<Path>, L: AsRef<Path>>(base: B, local: L) -> Result<Config> {
    debug!(
        "Loading configuration from {} (local override: {})",
        base.as_ref().display(),
        local.as_ref().display()
    );

    let config = config::Config::builder()
        .add_source(File::from(base.as_ref()))
        .add_source(File::from(local.as_ref()).required(false))
        .add_source(
            Environment::with_prefix(SETTINGS_SECTION)
                .separator("__")
                .keep_prefix(true)
                .try_parsing(true),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}
