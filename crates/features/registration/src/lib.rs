//! # Registration
//!
//! [`Registrar`] turns a [`RegistrationForm`](confhub_domain::RegistrationForm) into a
//! persisted [`Registration`](confhub_domain::Registration):
//!
//! 1. the conference must exist and have spaces left;
//! 2. the form must pass the [`Validator`] (all field errors are reported together);
//! 3. after the configured submission delay one space is taken and the entry is appended
//!    to the `registrations` log in the key-value store.

mod error;
mod registrar;
pub mod validation;

pub use crate::error::{RegistrationError, RegistrationErrorExt};
pub use crate::registrar::{Registrar, RegistrarInner};
pub use crate::validation::{FieldError, FieldErrors, Validator};
