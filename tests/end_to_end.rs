//! End-to-end flow: save weights, load them back through the startup path,
//! and classify an image the way the server does.

use image::{DynamicImage, GrayImage};

use trafficsign_net::backend::DefaultBackend;
use trafficsign_net::model::weights::{load_pretrained, save_weights};
use trafficsign_net::{class_name, Predictor, TrafficSignNet, TrafficSignNetConfig, NUM_CLASSES};

fn temp_weights(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("trafficsign-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir.join(name)
}

#[test]
fn grayscale_png_upload_flow() {
    let device = Default::default();
    let config = TrafficSignNetConfig::new();
    let model = TrafficSignNet::<DefaultBackend>::new(&config, &device);

    let path = temp_weights("flow");
    save_weights(model, &path).expect("save weights");

    // The same load path the server runs at startup
    let model = load_pretrained::<DefaultBackend>(&path, &device).expect("load weights");
    let predictor = Predictor::new(model, device);

    // A 64x64 grayscale image, like an uploaded photo of a sign
    let image = DynamicImage::ImageLuma8(GrayImage::from_fn(64, 64, |x, y| {
        image::Luma([((x + y) % 256) as u8])
    }));

    let first = predictor.predict_image(&image).expect("first prediction");
    let second = predictor.predict_image(&image).expect("second prediction");

    // The label is one of the 43 fixed strings, confidence in (0, 1]
    assert!(first.predicted_class < NUM_CLASSES);
    assert_eq!(
        first.class_name,
        class_name(first.predicted_class).unwrap()
    );
    assert!(first.confidence > 0.0 && first.confidence <= 1.0);

    // Confidence equals the max of a distribution summing to ~1
    let max = first
        .probabilities
        .iter()
        .cloned()
        .fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(first.confidence, max);
    let sum: f32 = first.probabilities.iter().sum();
    assert!((sum - 1.0).abs() < 1e-4);

    // Repeated calls are deterministic
    assert_eq!(first.predicted_class, second.predicted_class);
    assert_eq!(first.probabilities, second.probabilities);
}
