//! Utility modules for the routine tracker.
//!
//! - [`datetime`] - Date keys, reminder times and display formatting
//! - [`clock`] - Injectable time sources

pub mod clock;
pub mod datetime;

pub use clock::{Clock, FixedClock, SystemClock};
