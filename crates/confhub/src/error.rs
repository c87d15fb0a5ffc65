use confhub_catalog::CatalogError;
use confhub_registration::RegistrationError;
use confhub_storage::StorageError;
use std::borrow::Cow;

#[confhub_derive::confhub_error]
pub enum PlatformError {
    #[error("Storage unavailable{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Catalog failed{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },

    #[error("Registration setup failed{}: {source}", format_context(.context))]
    Registration { source: RegistrationError, context: Option<Cow<'static, str>> },
}
