//! Trait abstractions for dependency injection and testability.
//!
//! The conversion core is pure apart from two inputs: the current time and,
//! for synthetic timestamps, a random increment. Both come in through these
//! traits so tests can pin them.
//!
//! # Traits
//!
//! - [`Clock`] - current wall-clock time in epoch milliseconds
//! - [`JitterSource`] - spacing between synthetic timestamps

pub mod clock;
pub mod jitter;

pub use clock::{Clock, FixedClock, SystemClock};
pub use jitter::{FixedJitter, JitterSource, RandomJitter, JITTER_RANGE_MS};
