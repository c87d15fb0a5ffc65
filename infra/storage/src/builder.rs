use crate::engine::{Backend, Compression, Storage, StorageInner};
use crate::error::{StorageError, StorageErrorExt};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoBackend;
#[derive(Debug, Default)]
pub struct InMemory;
#[derive(Debug)]
pub struct OnDisk {
    root: PathBuf,
    compression: Compression,
    create: bool,
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoBackend {}
impl Sealed for InMemory {}
impl Sealed for OnDisk {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct StorageBuilder<S: Sealed = NoBackend> {
    state: S,
}

impl StorageBuilder<NoBackend> {
    #[must_use = "Creates a new storage builder"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the process-local backend (the local-storage stand-in).
    #[must_use = "Selects the in-memory backend"]
    pub fn memory(self) -> StorageBuilder<InMemory> {
        StorageBuilder { state: InMemory }
    }

    /// Selects the disk backend rooted at `path`.
    #[must_use = "Selects the on-disk backend"]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<OnDisk> {
        StorageBuilder {
            state: OnDisk { root: path.into(), compression: Compression::None, create: true },
        }
    }
}

impl StorageBuilder<InMemory> {
    #[must_use]
    pub fn build(self) -> Storage {
        Storage {
            inner: Arc::new(StorageInner {
                backend: Backend::Memory(RwLock::new(FxHashMap::default())),
            }),
        }
    }
}

impl StorageBuilder<OnDisk> {
    #[must_use = "Sets compression for stored values"]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.state.compression = compression;
        self
    }

    #[must_use = "Sets whether the root directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.state.create = enable;
        self
    }

    /// Initializes the disk backend.
    ///
    /// Creates the root when `create(true)` (the default), canonicalizes it, and purges temp
    /// files left behind by interrupted writes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the root is missing and may not be created, or cannot
    /// be resolved.
    pub async fn connect(self) -> Result<Storage, StorageError> {
        let OnDisk { root, compression, create } = self.state;

        if create {
            fs::create_dir_all(&root)
                .await
                .context(format!("Failed to bootstrap storage root: {}", root.display()))?;
            info!(path = %root.display(), "Bootstrapped storage root directory");
        }

        let canonical = fs::canonicalize(&root)
            .await
            .context(format!("Failed to resolve storage root: {}", root.display()))?;

        let storage = Storage {
            inner: Arc::new(StorageInner {
                backend: Backend::Disk {
                    root: canonical,
                    compression,
                    tmp_counter: AtomicU64::new(1),
                },
            }),
        };

        storage.purge_tmp().await;

        Ok(storage)
    }
}
