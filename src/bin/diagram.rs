//! Architecture Diagram Tool
//!
//! One-shot script: writes the TrafficSignNet topology as a Graphviz file
//! and renders it to PNG in the working directory. Takes no inputs beyond
//! invocation.
//!
//! Usage:
//!   cargo run --bin diagram
//!   cargo run --bin diagram -- --out-dir docs --no-render

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use trafficsign_net::diagram;
use trafficsign_net::utils::logging::init_default_logging;

/// Render the TrafficSignNet architecture diagram
#[derive(Parser, Debug)]
#[command(name = "diagram")]
#[command(about = "Emit the TrafficSignNet layer diagram (.dot + .png)")]
struct Args {
    /// Directory the .dot and .png files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Only write the .dot file, skip the Graphviz render step
    #[arg(long)]
    no_render: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_default_logging().map_err(|e| anyhow::anyhow!(e))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output dir {:?}", args.out_dir))?;

    let dot_path = diagram::write_dot(&args.out_dir).context("failed to write dot file")?;

    if args.no_render {
        info!("Skipping render (--no-render)");
        return Ok(());
    }

    let png_path = diagram::render_png(&dot_path).context("failed to render diagram")?;
    info!("Diagram ready at {}", png_path.display());

    Ok(())
}
