use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// File stem looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "confhub";
/// Prefix of environment overrides, e.g. `CONFHUB__LISTING__PAGE_SIZE=6`.
pub const ENV_PREFIX: &str = "CONFHUB";

#[confhub_derive::confhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration file and overlays `CONFHUB__` environment variables.
///
/// Nested keys use a double underscore: `CONFHUB__REGISTRATION__SUBMIT_DELAY_MS` maps to
/// `registration.submit_delay_ms`. The file format follows its extension (`toml`, `json`,
/// `yaml`); a bare stem such as `"confhub"` tries each supported extension.
///
/// # Errors
///
/// Returns [`ConfigError::Config`] if the file cannot be found or its content does not match
/// `T`.
///
/// # Example
/// ```rust
/// use confhub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Settings {
///     page_size: usize,
/// }
///
/// let cfg: Settings = load_config(Some("config/local")).unwrap_or_default();
/// assert_eq!(cfg.page_size, 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
