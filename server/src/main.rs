//! Traffic Sign Recognition Server
//!
//! HTTP server for the traffic-sign classifier demo. Serves the upload
//! page, runs one blocking forward pass per uploaded image, and reports
//! the predicted class with its confidence. The pretrained weights are
//! loaded once at startup; a missing or mismatched weights file is fatal.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trafficsign_net::backend::{backend_name, default_device, DefaultBackend};
use trafficsign_net::model::weights::{load_pretrained, DEFAULT_WEIGHTS_PATH};
use trafficsign_net::{Predictor, NUM_CLASSES};

use crate::state::AppState;

/// Traffic Sign Recognition Server
#[derive(Parser, Debug)]
#[command(name = "trafficsign-server")]
#[command(version)]
#[command(about = "Single-page upload form serving TrafficSignNet predictions")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to the weights file (without .mpk extension)
    #[arg(long, default_value = DEFAULT_WEIGHTS_PATH, env = "TRAFFICSIGN_WEIGHTS")]
    weights: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("Traffic Sign Recognition Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", backend_name());
    info!("Weights: {:?}", cli.weights);
    info!("Classes: {}", NUM_CLASSES);

    // Load the model once; the service cannot run without a matching
    // weights file, so any mismatch aborts startup here.
    let device = default_device();
    let model = load_pretrained::<DefaultBackend>(&cli.weights, &device)
        .context("failed to load pretrained weights")?;
    let predictor = Predictor::new(model, device);

    // Create shared state
    let state = Arc::new(AppState::new(predictor));

    // Build router
    let app = Router::new()
        .route("/", get(routes::index::upload_page))
        .route("/predict", post(routes::predict::predict))
        .route("/health", get(routes::health::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
