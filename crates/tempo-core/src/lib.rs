//! # Tempo Core
//!
//! Core types shared across the Tempo demo service:
//! - Error types and the crate-wide [`Result`] alias
//! - The clock abstraction used by the time endpoint

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod clock;
pub mod error;

pub use clock::{FixedClock, SystemClock, TimeProvider};
pub use error::{Error, Result};
