//! Core key-value engine.
//!
//! [`Storage`] is the stand-in for browser local storage: string values under string keys,
//! last write wins. The in-memory backend lives for the process; the disk backend keeps one
//! file per key under a canonical root and replaces it atomically on every write.

use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::StorageKey;
use crate::maintenance;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const VALUE_EXTENSION: &str = "kv";
pub(crate) const TMP_MARKER: &str = ".chtmp.";

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    Lz4,
}

impl Compression {
    #[must_use]
    fn compress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(data),
        }
    }

    fn decompress(self, data: Vec<u8>) -> Result<Vec<u8>, StorageError> {
        match self {
            Self::None => Ok(data),
            Self::Lz4 => {
                lz4_flex::decompress_size_prepended(&data).context("Lz4 decompression failed")
            },
        }
    }
}

#[derive(Debug)]
pub(crate) enum Backend {
    Memory(RwLock<FxHashMap<StorageKey, String>>),
    Disk { root: PathBuf, compression: Compression, tmp_counter: AtomicU64 },
}

/// The internal shared state of a [`Storage`] instance.
#[derive(Debug)]
pub struct StorageInner {
    pub(crate) backend: Backend,
}

/// A cloneable handle to the key-value store.
///
/// # Example
///
/// ```rust
/// use confhub_storage::{Storage, StorageError};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), StorageError> {
///     let storage = Storage::builder().memory().build();
///
///     storage.set("registrations", "[]").await?;
///     assert_eq!(storage.get("registrations").await?.as_deref(), Some("[]"));
///     assert_eq!(storage.get("conferences").await?, None);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Deref for Storage {
    type Target = StorageInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Storage {
    #[must_use = "The storage is not usable until a backend is chosen and built"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    /// Shorthand for an empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::builder().memory().build()
    }

    /// Returns the physical root when the store is disk-backed.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        match &self.backend {
            Backend::Disk { root, .. } => Some(root),
            Backend::Memory(_) => None,
        }
    }

    /// Reads the value stored under `key`.
    ///
    /// Missing keys are `Ok(None)`, mirroring `localStorage.getItem`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys, [`StorageError::Io`] on disk
    /// failures and [`StorageError::Decompress`]/[`StorageError::Encoding`] for corrupt files.
    pub async fn get<K>(&self, key: K) -> Result<Option<String>, StorageError>
    where
        K: TryInto<StorageKey, Error = StorageError>,
    {
        let key = key.try_into()?;

        match &self.backend {
            Backend::Memory(map) => Ok(map.read().get(&key).cloned()),
            Backend::Disk { root, compression, .. } => {
                let path = value_path(root, &key);
                let raw = match fs::read(&path).await {
                    Ok(raw) => raw,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                    Err(err) => {
                        return Err(StorageError::Io {
                            source: err,
                            context: Some(format!("Read failed: {}", path.display()).into()),
                        });
                    },
                };

                let bytes = compression.decompress(raw)?;
                let value = String::from_utf8(bytes).context(format!("Key '{key}'"))?;
                Ok(Some(value))
            },
        }
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// On disk the value goes to a unique temporary file that is synced and then renamed over
    /// the target, so a reader never observes a half-written value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys and [`StorageError::Io`] when
    /// the disk write fails.
    pub async fn set<K>(&self, key: K, value: impl Into<String>) -> Result<(), StorageError>
    where
        K: TryInto<StorageKey, Error = StorageError>,
    {
        let key = key.try_into()?;
        let value = value.into();

        match &self.backend {
            Backend::Memory(map) => {
                debug!(key = %key, bytes = value.len(), "Value stored in memory");
                map.write().insert(key, value);
                Ok(())
            },
            Backend::Disk { root, compression, tmp_counter } => {
                let path = value_path(root, &key);
                let temp = unique_tmp_path(&path, tmp_counter);
                let data = compression.compress(value.as_bytes());

                {
                    let mut file = fs::OpenOptions::new()
                        .create_new(true)
                        .write(true)
                        .open(&temp)
                        .await
                        .context(format!("Temp creation failed: {}", temp.display()))?;
                    file.write_all(&data).await.context("Write failed")?;
                    file.sync_all().await.context("Hardware sync failed")?;
                }

                if let Err(err) = fs::rename(&temp, &path).await {
                    if err.kind() == std::io::ErrorKind::AlreadyExists {
                        fs::remove_file(&path)
                            .await
                            .context(format!("Failed to replace {}", path.display()))?;
                        fs::rename(&temp, &path)
                            .await
                            .context(format!("Atomic swap failed: {}", path.display()))?;
                    } else {
                        let _ = fs::remove_file(&temp).await;
                        return Err(StorageError::Io {
                            source: err,
                            context: Some(
                                format!("Atomic swap failed: {}", path.display()).into(),
                            ),
                        });
                    }
                }

                debug!(key = %key, path = %path.display(), "Value saved atomically");
                Ok(())
            },
        }
    }

    /// Removes `key`, returning whether a value was present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys and [`StorageError::Io`] when
    /// the file exists but cannot be removed.
    pub async fn remove<K>(&self, key: K) -> Result<bool, StorageError>
    where
        K: TryInto<StorageKey, Error = StorageError>,
    {
        let key = key.try_into()?;

        match &self.backend {
            Backend::Memory(map) => Ok(map.write().remove(&key).is_some()),
            Backend::Disk { root, .. } => {
                let path = value_path(root, &key);
                match fs::remove_file(&path).await {
                    Ok(()) => {
                        debug!(key = %key, "Value removed");
                        Ok(true)
                    },
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
                    Err(err) => Err(StorageError::Io {
                        source: err,
                        context: Some(format!("Failed to delete: {}", path.display()).into()),
                    }),
                }
            },
        }
    }

    /// Checks whether a value is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys.
    pub fn contains<K>(&self, key: K) -> Result<bool, StorageError>
    where
        K: TryInto<StorageKey, Error = StorageError>,
    {
        let key = key.try_into()?;

        Ok(match &self.backend {
            Backend::Memory(map) => map.read().contains_key(&key),
            Backend::Disk { root, .. } => value_path(root, &key).exists(),
        })
    }

    /// Removes temporary files orphaned by interrupted writes. No-op in memory.
    pub async fn purge_tmp(&self) {
        if let Backend::Disk { root, .. } = &self.backend {
            maintenance::purge_tmp(root).await;
        }
    }
}

fn value_path(root: &Path, key: &StorageKey) -> PathBuf {
    root.join(format!("{key}.{VALUE_EXTENSION}"))
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("value");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
}
