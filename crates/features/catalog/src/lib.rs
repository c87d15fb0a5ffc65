//! # Conference Catalog
//!
//! The catalog slice owns the conference list and the pure functions that turn it into a
//! page of results:
//!
//! * [`Catalog`]: shared handle over the list, loaded from and written back to the
//!   key-value store.
//! * [`filter`]: compiles a [`FilterSpec`](confhub_domain::FilterSpec) into a [`Predicate`].
//! * [`pipeline`]: filters in catalog order and slices fixed-size pages.
//!
//! ```rust
//! use confhub_catalog::{compile, paginate};
//! use confhub_domain::{FilterSpec, PageRequest};
//!
//! let page = paginate(&[], &compile(&FilterSpec::default()), PageRequest::default());
//! assert_eq!(page.total_count, 0);
//! assert_eq!(page.page_count, 0);
//! ```

mod error;
pub mod filter;
pub mod pipeline;
pub mod seed;
mod store;

pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::filter::{Predicate, compile};
pub use crate::pipeline::{filter_all, paginate};
pub use crate::store::{Catalog, CatalogInner};
