//! CNN architecture for traffic-sign classification
//!
//! This module implements TrafficSignNet using the Burn framework: three
//! double-convolution blocks with increasing width (64 -> 128 -> 256),
//! global average pooling, and a dense head producing 43 class scores.
//! The topology is fixed and matched exactly by the pretrained weights;
//! it is not designed to be portable across input resolutions beyond the
//! 32x32x3 shape it was built for.

use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d,
        Relu,
    },
    tensor::{backend::Backend, Tensor},
};

/// Configuration for the TrafficSignNet model
#[derive(Config, Debug)]
pub struct TrafficSignNetConfig {
    /// Number of output classes (43 for GTSRB)
    #[config(default = "43")]
    pub num_classes: usize,

    /// Input image size (square)
    #[config(default = "32")]
    pub input_size: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Base number of convolutional filters (doubled per block)
    #[config(default = "64")]
    pub base_filters: usize,

    /// Dropout rate after each convolutional block
    #[config(default = "0.25")]
    pub block_dropout: f64,

    /// Dropout rate in the classifier head
    #[config(default = "0.5")]
    pub head_dropout: f64,
}

/// A double-convolution block:
/// [Conv2d 3x3 same -> BatchNorm -> ReLU] x2 -> MaxPool 2x2 -> Dropout
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    pub conv1: Conv2d<B>,
    pub bn1: BatchNorm<B>,
    pub conv2: Conv2d<B>,
    pub bn2: BatchNorm<B>,
    pub relu: Relu,
    pub pool: MaxPool2d,
    pub dropout: Dropout,
}

impl<B: Backend> ConvBlock<B> {
    /// Create a new convolutional block
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        dropout_rate: f64,
        device: &B::Device,
    ) -> Self {
        let conv1 = Conv2dConfig::new([in_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let bn1 = BatchNormConfig::new(out_channels).init(device);

        let conv2 = Conv2dConfig::new([out_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let bn2 = BatchNormConfig::new(out_channels).init(device);

        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        let dropout = DropoutConfig::new(dropout_rate).init();

        Self {
            conv1,
            bn1,
            conv2,
            bn2,
            relu: Relu::new(),
            pool,
            dropout,
        }
    }

    /// Forward pass through the block, halving the spatial resolution
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv1.forward(x);
        let x = self.bn1.forward(x);
        let x = self.relu.forward(x);

        let x = self.conv2.forward(x);
        let x = self.bn2.forward(x);
        let x = self.relu.forward(x);

        let x = self.pool.forward(x);
        self.dropout.forward(x)
    }
}

/// Traffic sign classifier CNN
///
/// Architecture:
/// - 3 double-convolution blocks: 3 -> 64 -> 128 -> 256 channels,
///   each ending in MaxPool 2x2 and Dropout(0.25)
/// - Global average pooling
/// - Dense(256) + BatchNorm + ReLU + Dropout(0.5)
/// - Dense(43) classifier (softmax applied in `forward_softmax`)
///
/// Dropout layers are only active on autodiff backends, so inference is
/// deterministic.
#[derive(Module, Debug)]
pub struct TrafficSignNet<B: Backend> {
    // Convolutional blocks (public for structural validation)
    pub block1: ConvBlock<B>,
    pub block2: ConvBlock<B>,
    pub block3: ConvBlock<B>,

    // Global pooling
    pub global_pool: AdaptiveAvgPool2d,

    // Classifier head (public for structural validation)
    pub fc1: Linear<B>,
    pub bn_head: BatchNorm<B>,
    pub relu: Relu,
    pub dropout: Dropout,
    pub fc2: Linear<B>,

    num_classes: usize,
}

impl<B: Backend> TrafficSignNet<B> {
    /// Create a new TrafficSignNet from configuration
    pub fn new(config: &TrafficSignNetConfig, device: &B::Device) -> Self {
        let base = config.base_filters;

        // Blocks: 3 -> 64 -> 128 -> 256, spatial 32 -> 16 -> 8 -> 4
        let block1 = ConvBlock::new(config.in_channels, base, config.block_dropout, device);
        let block2 = ConvBlock::new(base, base * 2, config.block_dropout, device);
        let block3 = ConvBlock::new(base * 2, base * 4, config.block_dropout, device);

        let global_pool = AdaptiveAvgPool2dConfig::new([1, 1]).init();

        let fc1 = LinearConfig::new(base * 4, 256).init(device);
        let bn_head = BatchNormConfig::new(256).init(device);
        let dropout = DropoutConfig::new(config.head_dropout).init();
        let fc2 = LinearConfig::new(256, config.num_classes).init(device);

        Self {
            block1,
            block2,
            block3,
            global_pool,
            fc1,
            bn_head,
            relu: Relu::new(),
            dropout,
            fc2,
            num_classes: config.num_classes,
        }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, 3, height, width]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        // Convolutional feature extraction
        let x = self.block1.forward(x);
        let x = self.block2.forward(x);
        let x = self.block3.forward(x);

        // Global pooling: [B, C, H, W] -> [B, C, 1, 1]
        let x = self.global_pool.forward(x);

        // Flatten: [B, C, 1, 1] -> [B, C]
        let [batch_size, channels, _, _] = x.dims();
        let x = x.reshape([batch_size, channels]);

        // Classifier head. BatchNorm normalizes over a channel dimension,
        // so the dense activation is viewed as [B, features, 1] around the
        // call; at inference this matches feature-wise batch norm exactly.
        let x = self.fc1.forward(x);
        let x = self.bn_head.forward(x.reshape([batch_size, 256, 1]));
        let x = x.reshape([batch_size, 256]);
        let x = self.relu.forward(x);
        let x = self.dropout.forward(x);
        self.fc2.forward(x)
    }

    /// Forward pass with softmax for inference
    pub fn forward_softmax(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let logits = self.forward(x);
        burn::tensor::activation::softmax(logits, 1)
    }

    /// Get the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DefaultBackend;

    type TestBackend = DefaultBackend;

    #[test]
    fn test_output_shape() {
        let device = Default::default();
        let config = TrafficSignNetConfig::new();
        let model = TrafficSignNet::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::zeros([2, 3, 32, 32], &device);

        let output = model.forward(input);
        assert_eq!(output.dims(), [2, 43]);
    }

    #[test]
    fn test_softmax_is_probability_distribution() {
        let device = Default::default();
        let config = TrafficSignNetConfig::new();
        let model = TrafficSignNet::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::ones([1, 3, 32, 32], &device);
        let probs: Vec<f32> = model
            .forward_softmax(input)
            .into_data()
            .to_vec()
            .expect("probabilities convert to vec");

        assert_eq!(probs.len(), 43);
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_inference_is_deterministic() {
        let device = Default::default();
        let config = TrafficSignNetConfig::new();
        let model = TrafficSignNet::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::ones([1, 3, 32, 32], &device);
        let a: Vec<f32> = model
            .forward_softmax(input.clone())
            .into_data()
            .to_vec()
            .expect("first pass");
        let b: Vec<f32> = model
            .forward_softmax(input)
            .into_data()
            .to_vec()
            .expect("second pass");

        assert_eq!(a, b);
    }

    #[test]
    fn test_block_halves_resolution() {
        let device = Default::default();
        let block = ConvBlock::<TestBackend>::new(3, 64, 0.25, &device);

        let input = Tensor::<TestBackend, 4>::zeros([1, 3, 32, 32], &device);
        let output = block.forward(input);
        assert_eq!(output.dims(), [1, 64, 16, 16]);
    }
}
