//! Inference predictor
//!
//! Wraps the loaded model for single-image prediction: one synchronous
//! blocking forward pass per call, no batching, no retry. The predictor
//! holds the model immutably, so it can be shared across request handlers
//! without locking.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use burn::tensor::backend::Backend;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::classes::class_name;
use crate::inference::preprocess::preprocess;
use crate::model::cnn::TrafficSignNet;
use crate::utils::error::{Result, TrafficSignError};

/// Result of a single prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Path to the input image (if applicable)
    pub image_path: Option<PathBuf>,

    /// Predicted class index
    pub predicted_class: usize,

    /// Predicted class name
    pub class_name: String,

    /// Confidence score (probability) for the predicted class
    pub confidence: f32,

    /// Full probability distribution over all classes
    pub probabilities: Vec<f32>,

    /// Top-k predictions with their probabilities
    pub top_k: Vec<(usize, String, f32)>,

    /// Inference time in milliseconds
    pub inference_time_ms: f64,
}

impl PredictionResult {
    /// Create a new prediction result from a probability vector
    pub fn new(
        probabilities: Vec<f32>,
        inference_time: Duration,
        image_path: Option<PathBuf>,
    ) -> Self {
        // Find predicted class (argmax)
        let (predicted_class, &confidence) = probabilities
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap_or((0, &0.0));

        let class_name_str = class_name(predicted_class).unwrap_or("Unknown").to_string();

        // Get top-5 predictions
        let mut indexed: Vec<(usize, f32)> = probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| (i, p))
            .collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

        let top_k: Vec<(usize, String, f32)> = indexed
            .iter()
            .take(5)
            .map(|&(idx, prob)| {
                let name = class_name(idx).unwrap_or("Unknown").to_string();
                (idx, name, prob)
            })
            .collect();

        Self {
            image_path,
            predicted_class,
            class_name: class_name_str,
            confidence,
            probabilities,
            top_k,
            inference_time_ms: inference_time.as_secs_f64() * 1000.0,
        }
    }

    /// Confidence formatted as a percentage with two decimals
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }

    /// Pretty print the prediction result
    pub fn display(&self) -> String {
        let mut output = String::new();

        if let Some(path) = &self.image_path {
            output.push_str(&format!("Image: {:?}\n", path));
        }

        output.push_str(&format!(
            "Prediction: {} (class {})\n",
            self.class_name, self.predicted_class
        ));
        output.push_str(&format!("Confidence: {}\n", self.confidence_percent()));
        output.push_str(&format!(
            "Inference time: {:.2} ms\n",
            self.inference_time_ms
        ));

        output.push_str("\nTop-5 predictions:\n");
        for (i, (idx, name, prob)) in self.top_k.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (class {}) - {:.2}%\n",
                i + 1,
                name,
                idx,
                prob * 100.0
            ));
        }

        output
    }
}

/// Predictor for running inference with a loaded model
pub struct Predictor<B: Backend> {
    model: TrafficSignNet<B>,
    device: B::Device,
}

impl<B: Backend> Predictor<B> {
    /// Create a predictor around a model with loaded weights
    pub fn new(model: TrafficSignNet<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Number of output classes of the wrapped model
    pub fn num_classes(&self) -> usize {
        self.model.num_classes()
    }

    /// Run a single forward pass on a decoded image
    pub fn predict_image(&self, image: &DynamicImage) -> Result<PredictionResult> {
        let start = Instant::now();

        let input = preprocess::<B>(image, &self.device);
        let probabilities: Vec<f32> = self
            .model
            .forward_softmax(input)
            .into_data()
            .to_vec()
            .map_err(|e| {
                TrafficSignError::Inference(format!("failed to read output tensor: {:?}", e))
            })?;

        Ok(PredictionResult::new(probabilities, start.elapsed(), None))
    }

    /// Load an image from disk and predict
    pub fn predict_file(&self, path: &Path) -> Result<PredictionResult> {
        let image = image::open(path)
            .map_err(|e| TrafficSignError::ImageLoad(path.to_path_buf(), e.to_string()))?;

        let mut result = self.predict_image(&image)?;
        result.image_path = Some(path.to_path_buf());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DefaultBackend;
    use crate::model::cnn::TrafficSignNetConfig;
    use crate::NUM_CLASSES;
    use image::RgbImage;

    #[test]
    fn test_prediction_result_new() {
        let mut probs = vec![0.0; NUM_CLASSES];
        probs[14] = 0.8;
        probs[13] = 0.15;
        probs[2] = 0.05;

        let result = PredictionResult::new(probs, Duration::from_millis(50), None);

        assert_eq!(result.predicted_class, 14);
        assert_eq!(result.class_name, "Stop");
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.top_k.len(), 5);
        assert_eq!(result.top_k[0].0, 14);
        assert_eq!(result.top_k[1].0, 13);
    }

    #[test]
    fn test_confidence_percent_formatting() {
        let mut probs = vec![0.0; NUM_CLASSES];
        probs[0] = 0.875;
        let result = PredictionResult::new(probs, Duration::from_millis(1), None);
        assert_eq!(result.confidence_percent(), "87.50%");
    }

    #[test]
    fn test_predict_image_end_to_end() {
        let device = Default::default();
        let config = TrafficSignNetConfig::new();
        let model = TrafficSignNet::<DefaultBackend>::new(&config, &device);
        let predictor = Predictor::new(model, device);

        let image = image::DynamicImage::ImageRgb8(RgbImage::from_pixel(
            64,
            64,
            image::Rgb([200, 30, 30]),
        ));

        let result = predictor.predict_image(&image).expect("prediction runs");

        assert!(result.predicted_class < NUM_CLASSES);
        assert!(class_name(result.predicted_class).is_some());
        assert!((0.0..=1.0).contains(&result.confidence));
        let sum: f32 = result.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_repeated_predictions_are_identical() {
        let device = Default::default();
        let config = TrafficSignNetConfig::new();
        let model = TrafficSignNet::<DefaultBackend>::new(&config, &device);
        let predictor = Predictor::new(model, device);

        let image =
            image::DynamicImage::ImageRgb8(RgbImage::from_pixel(48, 48, image::Rgb([0, 90, 200])));

        let a = predictor.predict_image(&image).expect("first prediction");
        let b = predictor.predict_image(&image).expect("second prediction");

        assert_eq!(a.predicted_class, b.predicted_class);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.probabilities, b.probabilities);
    }

    #[test]
    fn test_predict_file_missing() {
        let device = Default::default();
        let config = TrafficSignNetConfig::new();
        let model = TrafficSignNet::<DefaultBackend>::new(&config, &device);
        let predictor = Predictor::new(model, device);

        let result = predictor.predict_file(Path::new("no/such/image.png"));
        assert!(result.is_err());
    }
}
