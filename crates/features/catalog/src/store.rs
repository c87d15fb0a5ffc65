use crate::error::{CatalogError, CatalogErrorExt};
use crate::seed;
use confhub_domain::config::CatalogConfig;
use confhub_domain::constants::{CONFERENCES_KEY, REGISTRATIONS_KEY};
use confhub_domain::{ConferenceId, ConferenceRecord};
use confhub_storage::Storage;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The internal shared state of a [`Catalog`].
#[derive(Debug)]
pub struct CatalogInner {
    storage: Storage,
    records: RwLock<Vec<ConferenceRecord>>,
    loaded: AtomicBool,
    load_delay: Duration,
    seed: bool,
    write_lock: Mutex<()>,
}

/// A cloneable handle to the authoritative conference list.
///
/// The list is read from the key-value store once by [`Catalog::load`] and afterwards only
/// changed by [`Catalog::decrement_capacity`] and [`Catalog::restore_capacity`], which write
/// it back.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

impl Deref for Catalog {
    type Target = CatalogInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Catalog {
    #[must_use]
    pub fn new(storage: Storage, config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                storage,
                records: RwLock::new(Vec::new()),
                loaded: AtomicBool::new(false),
                load_delay: config.load_delay(),
                seed: config.seed,
                write_lock: Mutex::new(()),
            }),
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Loads the conference list, seeding the store when it has none.
    ///
    /// Waits for the configured load delay first. An empty registration log is created
    /// alongside the seed so that both keys exist after the first start.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] when the store cannot be read or written and
    /// [`CatalogError::Serde`] when the stored list is not valid JSON.
    pub async fn load(&self) -> Result<Vec<ConferenceRecord>, CatalogError> {
        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }

        let stored = self.storage.get(CONFERENCES_KEY).await.context("Reading conferences")?;

        let records = match stored {
            Some(raw) => {
                serde_json::from_str::<Vec<ConferenceRecord>>(&raw).context("Stored conferences")?
            },
            None if self.seed => {
                let records = seed::conferences()?;
                self.persist(&records).await?;
                if !self.storage.contains(REGISTRATIONS_KEY)? {
                    self.storage
                        .set(REGISTRATIONS_KEY, "[]")
                        .await
                        .context("Creating the registration log")?;
                }
                info!(count = records.len(), "Seeded conference catalog");
                records
            },
            None => {
                warn!("No conferences stored and seeding is disabled");
                Vec::new()
            },
        };

        *self.records.write() = records.clone();
        self.loaded.store(true, Ordering::Release);
        info!(count = records.len(), "Conference catalog loaded");

        Ok(records)
    }

    #[must_use]
    pub fn get(&self, id: ConferenceId) -> Option<ConferenceRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    /// Like [`Catalog::get`], but a missing id is an error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id.
    pub fn require(&self, id: ConferenceId) -> Result<ConferenceRecord, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::not_found(id))
    }

    #[must_use]
    pub fn records(&self) -> Vec<ConferenceRecord> {
        self.records.read().clone()
    }

    /// Runs `f` over the current list without cloning it.
    pub fn with_records<R>(&self, f: impl FnOnce(&[ConferenceRecord]) -> R) -> R {
        f(&self.records.read())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Distinct categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.records
            .read()
            .iter()
            .map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Quick search over title, description and location, independent of the list filters.
    ///
    /// An empty query returns the whole catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<ConferenceRecord> {
        let term = query.trim().to_lowercase();
        let records = self.records.read();

        if term.is_empty() {
            return records.clone();
        }

        records
            .iter()
            .filter(|r| {
                [&r.title, &r.description, &r.location]
                    .into_iter()
                    .any(|field| field.to_lowercase().contains(&term))
            })
            .cloned()
            .collect()
    }

    /// The first conference of the catalog, shown as the featured one.
    #[must_use]
    pub fn featured(&self) -> Option<ConferenceRecord> {
        self.records.read().first().cloned()
    }

    /// The first `count` conferences in catalog order.
    #[must_use]
    pub fn latest(&self, count: usize) -> Vec<ConferenceRecord> {
        self.records.read().iter().take(count).cloned().collect()
    }

    /// Takes one space of conference `id` and writes the list back to the store.
    ///
    /// The in-memory change is made under the write lock, so any later read observes it even
    /// while the store write is still pending. Writes of the list are serialized, so the
    /// stored list never falls behind the in-memory one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id,
    /// [`CatalogError::CapacityExhausted`] when no spaces are left, and
    /// [`CatalogError::Storage`] when the list cannot be written back. A failed write leaves
    /// the capacity unchanged.
    pub async fn decrement_capacity(&self, id: ConferenceId) -> Result<u32, CatalogError> {
        let remaining = self
            .update_spaces(id, |spaces| {
                spaces.checked_sub(1).ok_or(CatalogError::CapacityExhausted { id, context: None })
            })
            .await?;

        debug!(conference = %id, remaining, "Capacity decremented");
        Ok(remaining)
    }

    /// Gives back one space of conference `id`, undoing a [`Catalog::decrement_capacity`]
    /// whose registration could not be completed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id and [`CatalogError::Storage`]
    /// when the list cannot be written back.
    pub async fn restore_capacity(&self, id: ConferenceId) -> Result<u32, CatalogError> {
        let remaining = self.update_spaces(id, |spaces| Ok(spaces.saturating_add(1))).await?;

        debug!(conference = %id, remaining, "Capacity restored");
        Ok(remaining)
    }

    async fn update_spaces(
        &self,
        id: ConferenceId,
        change: impl FnOnce(u32) -> Result<u32, CatalogError>,
    ) -> Result<u32, CatalogError> {
        let _guard = self.write_lock.lock().await;

        let (previous, remaining, snapshot) = {
            let mut records = self.records.write();
            let record =
                records.iter_mut().find(|r| r.id == id).ok_or_else(|| CatalogError::not_found(id))?;

            let previous = record.spaces;
            record.spaces = change(previous)?;
            let remaining = record.spaces;

            match serde_json::to_string(&*records) {
                Ok(snapshot) => (previous, remaining, snapshot),
                Err(err) => {
                    if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                        record.spaces = previous;
                    }
                    return Err(CatalogError::Serde {
                        source: err,
                        context: Some("Serializing conferences".into()),
                    });
                },
            }
        };

        if let Err(err) = self.storage.set(CONFERENCES_KEY, snapshot).await {
            if let Some(record) = self.records.write().iter_mut().find(|r| r.id == id) {
                record.spaces = previous;
            }
            warn!(conference = %id, error = %err, "Capacity change not persisted");
            return Err(CatalogError::Storage {
                source: err,
                context: Some("Writing conferences".into()),
            });
        }

        Ok(remaining)
    }

    async fn persist(&self, records: &[ConferenceRecord]) -> Result<(), CatalogError> {
        let _guard = self.write_lock.lock().await;
        let raw = serde_json::to_string(records).context("Serializing conferences")?;
        self.storage.set(CONFERENCES_KEY, raw).await.context("Writing conferences")?;
        Ok(())
    }
}
