use crate::validation::FieldErrors;
use confhub_catalog::CatalogError;
use confhub_domain::ConferenceId;
use confhub_storage::StorageError;
use std::borrow::Cow;

#[confhub_derive::confhub_error]
pub enum RegistrationError {
    #[error("Conference not found{}: {id}", format_context(.context))]
    NotFound { id: ConferenceId, context: Option<Cow<'static, str>> },

    #[error("No spaces left{}: conference {id}", format_context(.context))]
    CapacityExhausted { id: ConferenceId, context: Option<Cow<'static, str>> },

    /// One entry per rejected field; nothing was persisted.
    #[error("Invalid registration form{}: {errors}", format_context(.context))]
    Validation { errors: FieldErrors, context: Option<Cow<'static, str>> },

    #[error("Registration storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Registration log serialization error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid validation pattern{}: {source}", format_context(.context))]
    Pattern { source: regex::Error, context: Option<Cow<'static, str>> },

    #[error("Internal registration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl RegistrationError {
    /// Field-level messages of a [`RegistrationError::Validation`].
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl From<CatalogError> for RegistrationError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { id, context } => Self::NotFound { id, context },
            CatalogError::CapacityExhausted { id, context } => {
                Self::CapacityExhausted { id, context }
            },
            CatalogError::Storage { source, context } => Self::Storage { source, context },
            CatalogError::Serde { source, context } => Self::Serde { source, context },
            CatalogError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
