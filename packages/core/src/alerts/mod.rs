//! Alert banner selection.
//!
//! The store query narrows alerts down to active ones; [`selector`] picks
//! the one to surface and [`crate::presentation::AlertPresenter`] publishes it.

pub mod selector;

pub use selector::{decode_alerts, select_newest_alert};
