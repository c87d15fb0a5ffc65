#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared across the workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! confhub-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Examples are `ignore`d here because a proc-macro crate cannot invoke itself; the
//! `tests/` directory exercises the expansion from the outside.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns a plain enum into a workspace error type.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext<T>` with `.context(...)`, implemented for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant that wraps a source error.
/// * `From<Source>` for every variant with a `source` field (or a `#[source]`/`#[from]`
///   field), so `?` works on upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A `context` field must be typed
/// `Option<Cow<'static, str>>`, and variants carrying a source must have one.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[confhub_derive::confhub_error]
/// pub enum CatalogError {
///     #[error("Conference not found{}: {message}", format_context(.context))]
///     NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Catalog serialization failed{}: {source}", format_context(.context))]
///     Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<Vec<u8>, CatalogError> {
///     serde_json::from_str(raw).context("Decoding the conference list")
/// }
/// ```
#[proc_macro_attribute]
pub fn confhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
