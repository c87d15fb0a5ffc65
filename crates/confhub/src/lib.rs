//! Facade crate for the conference platform.
//! Re-exports the domain, kernel and feature slices and wires them into a [`Platform`].
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! ```rust
//! use confhub::Platform;
//! use confhub::domain::config::AppConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), confhub::PlatformError> {
//! let mut config = AppConfig::default();
//! config.catalog.load_delay_ms = 0;
//!
//! let platform = Platform::bootstrap(&config).await?;
//! assert!(!platform.listing().snapshot().state.is_loading);
//! # Ok(())
//! # }
//! ```

mod error;

pub use crate::error::{PlatformError, PlatformErrorExt};
pub use confhub_catalog as catalog;
pub use confhub_domain as domain;
pub use confhub_kernel as kernel;
pub use confhub_listing as listing;
pub use confhub_registration as registration;
pub use confhub_storage as storage;

use confhub_catalog::Catalog;
use confhub_domain::config::{AppConfig, StorageConfig};
use confhub_domain::{ConferenceId, Registration, RegistrationForm};
use confhub_listing::ViewController;
use confhub_registration::{Registrar, RegistrationError};
use confhub_storage::{Compression, Storage, StorageError};
use tracing::info;

/// The assembled platform: one store, one catalog, and the controller and registrar that
/// share it.
#[derive(Debug, Clone)]
pub struct Platform {
    config: AppConfig,
    storage: Storage,
    catalog: Catalog,
    listing: ViewController,
    registrar: Registrar,
}

impl Platform {
    /// Opens the store, wires every slice and loads the catalog into the list view.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the store cannot be opened or the catalog fails to load.
    pub async fn bootstrap(config: &AppConfig) -> Result<Self, PlatformError> {
        let storage = open_storage(&config.storage).await.context("Opening the store")?;
        let platform = Self::assemble(config, storage)?;

        platform.listing.load().await.context("Loading the catalog")?;
        info!(conferences = platform.catalog.len(), "Platform ready");

        Ok(platform)
    }

    /// Wires the slices over `storage` without loading anything.
    ///
    /// # Errors
    /// Returns [`PlatformError::Registration`] if the registrar cannot be built.
    pub fn assemble(config: &AppConfig, storage: Storage) -> Result<Self, PlatformError> {
        let catalog = Catalog::new(storage.clone(), &config.catalog);
        let listing = ViewController::new(catalog.clone(), &config.listing);
        let registrar = Registrar::new(catalog.clone(), &config.registration)?;

        Ok(Self { config: config.clone(), storage, catalog, listing, registrar })
    }

    /// Submits a registration and refreshes the list so the new capacity shows.
    ///
    /// # Errors
    /// Forwards the [`RegistrationError`] of [`Registrar::submit`].
    pub async fn register(
        &self,
        id: ConferenceId,
        form: RegistrationForm,
    ) -> Result<Registration, RegistrationError> {
        let registration = self.registrar.submit(id, form).await?;
        self.listing.refresh();
        Ok(registration)
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn listing(&self) -> &ViewController {
        &self.listing
    }

    #[must_use]
    pub const fn registrar(&self) -> &Registrar {
        &self.registrar
    }
}

/// Opens the configured store: in memory by default, on disk when `data_dir` is set.
///
/// # Errors
/// Returns [`StorageError`] when the data directory cannot be prepared.
pub async fn open_storage(config: &StorageConfig) -> Result<Storage, StorageError> {
    let Some(dir) = &config.data_dir else {
        return Ok(Storage::memory());
    };

    let compression = if config.compression { Compression::Lz4 } else { Compression::None };
    Storage::builder().root(dir).compression(compression).connect().await
}
