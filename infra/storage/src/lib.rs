//! Key-value persistence for the conference catalog and the registration log.
//!
//! The front-end this workspace models kept its data in browser local storage: JSON strings
//! under a handful of keys, last write wins. [`Storage`] keeps that contract and offers two
//! backends behind one handle:
//!
//! - **In-memory**: a process-local map, the default and the closest match to local storage.
//! - **On-disk**: one file per key under a canonical root, written with an atomic swap
//!   (unique temp file + `fsync` + `rename`), optional LZ4 compression, and cleanup of
//!   orphaned temp files on connect.
//!
//! Keys are validated ([`StorageKey`]) so they can never escape the disk root.
//!
//! # Examples
//!
//! ```rust
//! use confhub_storage::{Compression, Storage, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder()
//!         .root(tmp.path().join("data"))
//!         .compression(Compression::Lz4)
//!         .connect()
//!         .await?;
//!
//!     storage.set("conferences", r#"[{"id":1}]"#).await?;
//!     assert_eq!(storage.get("conferences").await?.as_deref(), Some(r#"[{"id":1}]"#));
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod key;
mod maintenance;

pub use builder::StorageBuilder;
pub use engine::{Compression, Storage};
pub use error::{StorageError, StorageErrorExt};
pub use key::StorageKey;
