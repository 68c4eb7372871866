//! Error Handling Module
//!
//! Defines custom error types for the traffic-sign library.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for traffic-sign operations
#[derive(Error, Debug)]
pub enum TrafficSignError {
    /// Error loading or decoding an image
    #[error("Failed to load image at '{0}': {1}")]
    ImageLoad(PathBuf, String),

    /// Error with model weights or architecture
    #[error("Model error: {0}")]
    Model(String),

    /// Error during inference
    #[error("Inference error: {0}")]
    Inference(String),

    /// Configuration or environment error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience Result type for traffic-sign operations
pub type Result<T> = std::result::Result<T, TrafficSignError>;
