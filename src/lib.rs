//! `credit-risk` library crate.
//!
//! The binary (`crisk`) is a thin wrapper around this library so that:
//!
//! - every unit is testable without spawning processes
//! - generators and math never print; presentation lives in `report` and `plot`

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
