//! Output files.
//!
//! - full run as JSON, interpolated curve as CSV (`export`)

pub mod export;

pub use export::*;
