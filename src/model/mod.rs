//! Model definition and weight handling

pub mod cnn;
pub mod weights;
