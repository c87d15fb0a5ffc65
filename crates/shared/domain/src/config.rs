use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub listing: ListingConfig,
    pub registration: RegistrationConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Key-value persistence. Without a `data_dir` the store lives in memory.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    /// Lz4-compress values on disk.
    pub compression: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Simulated latency of the initial load.
    pub load_delay_ms: u64,
    /// Write the built-in conference list when the store has none.
    pub seed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: usize,
    pub search_debounce_ms: u64,
    pub location_debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Simulated latency of a submission.
    pub submit_delay_ms: u64,
    /// Require document, birth date, profession and company.
    pub require_profile: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Rolling log files go here when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
    /// Full `EnvFilter` directive; overrides `level`.
    pub env_filter: Option<String>,
}

impl CatalogConfig {
    #[must_use]
    pub const fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

impl ListingConfig {
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    #[must_use]
    pub const fn location_debounce(&self) -> Duration {
        Duration::from_millis(self.location_debounce_ms)
    }
}

impl RegistrationConfig {
    #[must_use]
    pub const fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

// --- Default ---

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { load_delay_ms: 1500, seed: true }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { page_size: crate::DEFAULT_PAGE_SIZE, search_debounce_ms: 300, location_debounce_ms: 2000 }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { submit_delay_ms: 1000, require_profile: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false, env_filter: None }
    }
}
