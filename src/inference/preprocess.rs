//! Image preprocessing
//!
//! Turns an arbitrary uploaded image (any size, RGB/RGBA/grayscale) into
//! the fixed `[1, 3, 32, 32]` float tensor the network was trained on:
//! resize to 32x32, force 3-channel RGB, scale to [0, 1], CHW layout with
//! a leading batch dimension.
//!
//! The Triangle (bilinear) filter matches the resize used when the
//! weights were trained; changing it would silently degrade accuracy.

use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::{imageops::FilterType, DynamicImage};

use crate::IMAGE_SIZE;

/// Resize and convert an image to a flattened CHW float array in [0, 1]
pub fn image_to_chw(image: &DynamicImage) -> Vec<f32> {
    let size = IMAGE_SIZE as u32;
    // Convert to RGB before resampling, dropping alpha/expanding grayscale
    // first; the resize then only ever sees three color channels
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8())
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgb8();

    let (width, height) = (IMAGE_SIZE, IMAGE_SIZE);
    let mut chw = vec![0.0f32; 3 * height * width];

    for y in 0..height {
        for x in 0..width {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            chw[y * width + x] = pixel[0] as f32 / 255.0;
            chw[height * width + y * width + x] = pixel[1] as f32 / 255.0;
            chw[2 * height * width + y * width + x] = pixel[2] as f32 / 255.0;
        }
    }

    chw
}

/// Preprocess an image into a `[1, 3, 32, 32]` inference tensor
pub fn preprocess<B: Backend>(image: &DynamicImage, device: &B::Device) -> Tensor<B, 4> {
    let chw = image_to_chw(image);
    Tensor::<B, 4>::from_floats(
        TensorData::new(chw, [1, 3, IMAGE_SIZE, IMAGE_SIZE]),
        device,
    )
}
