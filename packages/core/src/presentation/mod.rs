//! Screen state owners.
//!
//! Each presenter is owned by one UI context and is the only writer of
//! its state; data comes in through the traits in [`crate::services`].

pub mod alert;
pub mod contributors;
pub mod odometer;

pub use alert::AlertPresenter;
pub use contributors::ContributorsViewModel;
pub use odometer::{OdometerViewModel, ReadingRow};
