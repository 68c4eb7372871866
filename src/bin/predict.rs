//! CLI Prediction Tool
//!
//! Runs a single image through the pretrained network and prints the
//! predicted class with its confidence, without starting the web server.
//!
//! Usage:
//!   cargo run --release --bin predict -- --image stop.png

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use trafficsign_net::backend::{backend_name, default_device, DefaultBackend};
use trafficsign_net::model::weights::{load_pretrained, DEFAULT_WEIGHTS_PATH};
use trafficsign_net::utils::logging::init_default_logging;
use trafficsign_net::Predictor;

/// Classify a traffic-sign image from the command line
#[derive(Parser, Debug)]
#[command(name = "predict")]
#[command(about = "Classify a traffic-sign image with the pretrained model")]
struct Args {
    /// Path to the image to classify (.jpg/.jpeg/.png)
    #[arg(short, long)]
    image: PathBuf,

    /// Path to the weights file (without .mpk extension)
    #[arg(short, long, default_value = DEFAULT_WEIGHTS_PATH, env = "TRAFFICSIGN_WEIGHTS")]
    weights: PathBuf,

    /// Print the full result as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_default_logging().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Backend: {}", backend_name());

    let device = default_device();
    let model = load_pretrained::<DefaultBackend>(&args.weights, &device)
        .context("failed to load pretrained weights")?;
    let predictor = Predictor::new(model, device);

    let result = predictor
        .predict_file(&args.image)
        .context("prediction failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", result.display());
    }

    Ok(())
}
