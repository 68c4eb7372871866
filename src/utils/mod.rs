//! Logging and error utilities

pub mod error;
pub mod logging;
