//! # TrafficSignNet
//!
//! A Rust library for traffic-sign recognition on the GTSRB classes using
//! the Burn framework. The network is a fixed-topology CNN trained on
//! 32x32 RGB crops; this crate covers inference only.
//!
//! ## Modules
//!
//! - `classes`: the 43-entry class-name table and lookup helpers
//! - `model`: CNN architecture and weight loading
//! - `inference`: image preprocessing and the prediction API
//! - `diagram`: static Graphviz description of the layer topology
//! - `utils`: logging and error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trafficsign_net::backend::{default_device, DefaultBackend};
//! use trafficsign_net::model::weights::load_pretrained;
//! use trafficsign_net::Predictor;
//!
//! let device = default_device();
//! let model = load_pretrained::<DefaultBackend>("weights/traffic_sign_net".as_ref(), &device)?;
//! let predictor = Predictor::new(model, device);
//! let result = predictor.predict_file("stop.png".as_ref())?;
//! println!("{}", result.display());
//! ```

pub mod backend;
pub mod classes;
pub mod diagram;
pub mod inference;
pub mod model;
pub mod utils;

// Re-export commonly used items for convenience
pub use classes::{class_index, class_name, CLASS_NAMES};
pub use inference::predictor::{PredictionResult, Predictor};
pub use inference::preprocess::preprocess;
pub use model::cnn::{TrafficSignNet, TrafficSignNetConfig};
pub use model::weights::{load_pretrained, save_weights, DEFAULT_WEIGHTS_PATH};
pub use utils::error::{Result, TrafficSignError};

/// GTSRB traffic-sign classes (43 total)
pub const NUM_CLASSES: usize = 43;

/// Input image side length the network was trained for
pub const IMAGE_SIZE: usize = 32;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
