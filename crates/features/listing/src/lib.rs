//! # Conference Listing
//!
//! State machine behind the conference list view. [`ViewController`] owns the filter,
//! search and page state, recomputes the visible page through the catalog pipeline and
//! publishes a [`ListingSnapshot`] over a `tokio::sync::watch` channel.
//!
//! Debouncing is explicit: a [`Debouncer`] holds the latest input and a [`Clock`] says when
//! it is due, so the controller runs the same under tokio, in a test with a
//! [`ManualClock`], or inside any other event loop that calls [`ViewController::tick`].

pub mod clock;
mod controller;
mod debounce;
mod state;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::controller::{ControllerInner, ViewController};
pub use crate::debounce::Debouncer;
pub use crate::state::{ListingSnapshot, ViewState};
