//! Backend selection for the Burn framework
//!
//! Inference for this demo runs on the CPU via the NdArray backend. The
//! model is small enough (32x32 inputs) that a single forward pass is
//! comfortably sub-second without GPU acceleration.

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::NdArray;

/// The default backend for inference
pub type DefaultBackend = NdArray;

/// Get the default device
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    "NdArray (CPU)"
}
