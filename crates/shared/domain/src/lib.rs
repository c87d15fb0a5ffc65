//! # Domain Models
//!
//! Conference records, filter and page descriptions, registration payloads and the
//! configuration tree. Dependencies stay minimal (`serde`, `bitflags`, `chrono`): no I/O,
//! no async, just data and small helpers.

pub mod conference;
pub mod config;
pub mod constants;
pub mod filter;
pub mod page;
pub mod registration;

pub use conference::{ConferenceId, ConferenceRecord};
pub use filter::{ActiveFilters, FilterPatch, FilterSpec, PriceRange};
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, PageResult};
pub use registration::{FormField, Registration, RegistrationForm};
