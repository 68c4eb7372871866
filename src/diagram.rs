//! Architecture diagram generator
//!
//! Emits a Graphviz description of the TrafficSignNet layer topology for
//! documentation. The node/edge list is written out by hand to mirror the
//! model definition; it is not derived from the model object. Rendering is
//! delegated to the external `dot` tool.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::utils::error::{Result, TrafficSignError};

/// File stem used for the emitted `.dot` and `.png` files
pub const DIAGRAM_NAME: &str = "traffic_sign_net";

/// Nodes of the diagram as (id, label) pairs, in layer order
const NODES: [(&str, &str); 12] = [
    ("Input", "Input Layer\\n32x32x3"),
    ("Conv1_1", "Conv2D (64)\\n3x3 + ReLU + BN"),
    ("Conv1_2", "Conv2D (64)\\n3x3 + ReLU + BN"),
    ("Pool1", "MaxPool 2x2\\nDropout(0.25)"),
    ("Conv2_1", "Conv2D (128)\\n3x3 + ReLU + BN"),
    ("Conv2_2", "Conv2D (128)\\n3x3 + ReLU + BN"),
    ("Pool2", "MaxPool 2x2\\nDropout(0.25)"),
    ("Conv3_1", "Conv2D (256)\\n3x3 + ReLU + BN"),
    ("Conv3_2", "Conv2D (256)\\n3x3 + ReLU + BN"),
    ("Pool3", "MaxPool 2x2\\nDropout(0.25)"),
    ("GAP", "GlobalAvgPooling2D"),
    ("FC1", "Dense(256)\\nReLU + BN\\nDropout(0.5)"),
];

/// Output node, kept separate so the edge list below reads top to bottom
const OUTPUT_NODE: (&str, &str) = ("Output", "Dense(43)\\nSoftmax");

/// Build the DOT source for the architecture diagram.
///
/// The output is a fixed string: same nodes, edges, and ordering on every
/// call, regardless of environment.
pub fn dot_source() -> String {
    let mut dot = String::new();

    dot.push_str("digraph TrafficSignNet {\n");
    dot.push_str("    rankdir=LR;\n\n");

    for (id, label) in NODES.iter().chain(std::iter::once(&OUTPUT_NODE)) {
        dot.push_str(&format!("    {} [shape=box, label=\"{}\"];\n", id, label));
    }

    dot.push('\n');

    // Linear chain through both rows
    let chain = [
        ("Input", "Conv1_1"),
        ("Conv1_1", "Conv1_2"),
        ("Conv1_2", "Pool1"),
        ("Pool1", "Conv2_1"),
        ("Conv2_1", "Conv2_2"),
        ("Conv2_2", "Pool2"),
    ];
    for (from, to) in chain {
        dot.push_str(&format!("    {} -> {};\n", from, to));
    }

    // Jump to the second row without forcing a horizontal rank
    dot.push_str("    Pool2 -> Conv3_1 [constraint=false];\n");

    let chain = [
        ("Conv3_1", "Conv3_2"),
        ("Conv3_2", "Pool3"),
        ("Pool3", "GAP"),
        ("GAP", "FC1"),
        ("FC1", "Output"),
    ];
    for (from, to) in chain {
        dot.push_str(&format!("    {} -> {};\n", from, to));
    }

    dot.push('\n');
    dot.push_str("    { rank = same; Conv1_1; Conv1_2; Pool1; Conv2_1; Conv2_2; Pool2; }\n");
    dot.push_str("    { rank = same; Conv3_1; Conv3_2; Pool3; GAP; FC1; Output; }\n");
    dot.push_str("}\n");

    dot
}

/// Write the DOT source next to the given directory and return its path
pub fn write_dot(out_dir: &Path) -> Result<PathBuf> {
    let dot_path = out_dir.join(format!("{}.dot", DIAGRAM_NAME));
    std::fs::write(&dot_path, dot_source())?;
    info!("Wrote {}", dot_path.display());
    Ok(dot_path)
}

/// Render the DOT file to PNG with the external Graphviz `dot` tool
pub fn render_png(dot_path: &Path) -> Result<PathBuf> {
    let png_path = dot_path.with_extension("png");

    let status = Command::new("dot")
        .arg("-Tpng")
        .arg("-o")
        .arg(&png_path)
        .arg(dot_path)
        .status()
        .map_err(|e| {
            TrafficSignError::Config(format!("failed to run graphviz 'dot': {} (is it installed?)", e))
        })?;

    if !status.success() {
        return Err(TrafficSignError::Config(format!(
            "graphviz 'dot' exited with status {}",
            status
        )));
    }

    info!("Rendered {}", png_path.display());
    Ok(png_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_source_is_fixed() {
        assert_eq!(dot_source(), dot_source());
    }

    #[test]
    fn test_all_nodes_present() {
        let dot = dot_source();
        for id in [
            "Input", "Conv1_1", "Conv1_2", "Pool1", "Conv2_1", "Conv2_2", "Pool2", "Conv3_1",
            "Conv3_2", "Pool3", "GAP", "FC1", "Output",
        ] {
            assert!(dot.contains(&format!("{} [shape=box", id)), "missing {}", id);
        }
    }

    #[test]
    fn test_edge_count() {
        let dot = dot_source();
        assert_eq!(dot.matches(" -> ").count(), 12);
    }

    #[test]
    fn test_mirrors_classifier_width() {
        // The hand-written output label must stay in sync with NUM_CLASSES
        assert!(dot_source().contains(&format!("Dense({})", crate::NUM_CLASSES)));
    }
}
