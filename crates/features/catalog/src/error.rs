use confhub_domain::ConferenceId;
use confhub_storage::StorageError;
use std::borrow::Cow;

/// Errors raised by the catalog store.
#[confhub_derive::confhub_error]
pub enum CatalogError {
    #[error("Conference not found{}: {id}", format_context(.context))]
    NotFound { id: ConferenceId, context: Option<Cow<'static, str>> },

    /// The conference has no remaining spaces; its capacity stays at zero.
    #[error("No spaces left{}: conference {id}", format_context(.context))]
    CapacityExhausted { id: ConferenceId, context: Option<Cow<'static, str>> },

    #[error("Catalog storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    /// Stored conference list could not be read or written as JSON.
    #[error("Catalog serialization error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) const fn not_found(id: ConferenceId) -> Self {
        Self::NotFound { id, context: None }
    }
}
