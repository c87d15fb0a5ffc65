use crate::error::{RegistrationError, RegistrationErrorExt};
use crate::validation::Validator;
use chrono::Utc;
use confhub_catalog::Catalog;
use confhub_domain::config::RegistrationConfig;
use confhub_domain::constants::REGISTRATIONS_KEY;
use confhub_domain::{ConferenceId, ConferenceRecord, Registration, RegistrationForm};
use confhub_kernel::safe_nanoid;
use confhub_storage::Storage;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// The internal shared state of a [`Registrar`].
#[derive(Debug)]
pub struct RegistrarInner {
    catalog: Catalog,
    storage: Storage,
    validator: Validator,
    submit_delay: Duration,
    log_lock: Mutex<()>,
}

/// Accepts registrations for catalog conferences.
#[derive(Debug, Clone)]
pub struct Registrar {
    inner: Arc<RegistrarInner>,
}

impl Deref for Registrar {
    type Target = RegistrarInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Registrar {
    /// Creates a registrar writing to the catalog's store.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Pattern`] if the validation rules fail to compile.
    pub fn new(catalog: Catalog, config: &RegistrationConfig) -> Result<Self, RegistrationError> {
        let storage = catalog.storage().clone();

        Ok(Self {
            inner: Arc::new(RegistrarInner {
                catalog,
                storage,
                validator: Validator::new(config.require_profile)?,
                submit_delay: config.submit_delay(),
                log_lock: Mutex::new(()),
            }),
        })
    }

    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Returns the conference a registration page is opened for.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotFound`] for an unknown id.
    pub fn open(&self, id: ConferenceId) -> Result<ConferenceRecord, RegistrationError> {
        Ok(self.catalog.require(id)?)
    }

    /// Registers `form` for conference `id`.
    ///
    /// A sold-out conference is rejected before the form is looked at, and an invalid form
    /// is rejected before anything is written. Accepted registrations take one space and are
    /// appended to the registration log.
    ///
    /// # Errors
    ///
    /// * [`RegistrationError::NotFound`] for an unknown id.
    /// * [`RegistrationError::CapacityExhausted`] when no spaces are left.
    /// * [`RegistrationError::Validation`] with every failing field.
    /// * [`RegistrationError::Storage`]/[`RegistrationError::Serde`] when persisting fails.
    ///   A registration that cannot be logged gives its space back.
    pub async fn submit(
        &self,
        id: ConferenceId,
        form: RegistrationForm,
    ) -> Result<Registration, RegistrationError> {
        let conference = self.open(id)?;
        if conference.is_sold_out() {
            warn!(conference = %id, "Registration rejected: sold out");
            return Err(RegistrationError::CapacityExhausted { id, context: None });
        }

        let form = form.normalized();
        if let Err(err) = self.validator.validate(&form) {
            warn!(conference = %id, error = %err, "Registration rejected");
            return Err(err);
        }

        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }

        let remaining = self.catalog.decrement_capacity(id).await?;

        let registration =
            Registration { id: safe_nanoid!(), conference_id: id, form, created_at: Utc::now() };
        if let Err(err) = self.append(&registration).await {
            warn!(conference = %id, error = %err, "Registration not recorded, releasing the space");
            if let Err(restore) = self.catalog.restore_capacity(id).await {
                warn!(conference = %id, error = %restore, "Space could not be released");
            }
            return Err(err);
        }

        info!(
            conference = %id,
            registration = %registration.id,
            remaining,
            "Registration accepted"
        );

        Ok(registration)
    }

    /// Reads the registration log.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Storage`] or [`RegistrationError::Serde`] when the log
    /// cannot be read.
    pub async fn registrations(&self) -> Result<Vec<Registration>, RegistrationError> {
        let raw = self.storage.get(REGISTRATIONS_KEY).await.context("Reading registrations")?;
        match raw {
            Some(raw) => serde_json::from_str(&raw).context("Stored registrations"),
            None => Ok(Vec::new()),
        }
    }

    /// Registrations of one conference, oldest first.
    ///
    /// # Errors
    ///
    /// See [`Registrar::registrations`].
    pub async fn registrations_for(
        &self,
        id: ConferenceId,
    ) -> Result<Vec<Registration>, RegistrationError> {
        let mut all = self.registrations().await?;
        all.retain(|r| r.conference_id == id);
        Ok(all)
    }

    async fn append(&self, registration: &Registration) -> Result<(), RegistrationError> {
        let _guard = self.log_lock.lock().await;

        let mut log = self.registrations().await?;
        log.push(registration.clone());

        let raw = serde_json::to_string(&log).context("Serializing registrations")?;
        self.storage.set(REGISTRATIONS_KEY, raw).await.context("Writing registrations")?;
        Ok(())
    }
}
