//! Image preprocessing and the prediction API

pub mod predictor;
pub mod preprocess;
