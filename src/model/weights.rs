//! Weight loading and saving
//!
//! Weights live in Burn's named-MessagePack checkpoint format (written by
//! `CompactRecorder`, `.mpk` extension). The record must match the
//! hard-coded architecture exactly; any missing file, record mismatch, or
//! parameter-shape mismatch is a fatal error so the service refuses to
//! start rather than silently predicting garbage.

use std::path::Path;

use burn::{module::Module, record::CompactRecorder, tensor::backend::Backend};
use tracing::info;

use crate::classes::CLASS_NAMES;
use crate::model::cnn::{TrafficSignNet, TrafficSignNetConfig};
use crate::utils::error::{Result, TrafficSignError};

/// Default relative path of the weights file (extension added by the recorder)
pub const DEFAULT_WEIGHTS_PATH: &str = "weights/traffic_sign_net";

/// Load pretrained weights into the default architecture.
///
/// Fails if the file is missing, the record does not match the module
/// structure, or any parameter shape disagrees with the architecture.
pub fn load_pretrained<B: Backend>(path: &Path, device: &B::Device) -> Result<TrafficSignNet<B>> {
    load_with_config(&TrafficSignNetConfig::new(), path, device)
}

/// Load pretrained weights into an explicitly configured architecture
pub fn load_with_config<B: Backend>(
    config: &TrafficSignNetConfig,
    path: &Path,
    device: &B::Device,
) -> Result<TrafficSignNet<B>> {
    let recorder = CompactRecorder::new();
    let model = TrafficSignNet::new(config, device)
        .load_file(path, &recorder, device)
        .map_err(|e| {
            TrafficSignError::Model(format!(
                "failed to load weights from '{}': {}",
                path.display(),
                e
            ))
        })?;

    validate_shapes(&model, config)?;
    info!("Loaded weights from {}", path.display());

    Ok(model)
}

/// Save model weights with the same recorder the loader expects
pub fn save_weights<B: Backend>(model: TrafficSignNet<B>, path: &Path) -> Result<()> {
    let recorder = CompactRecorder::new();
    model.save_file(path, &recorder).map_err(|e| {
        TrafficSignError::Model(format!(
            "failed to save weights to '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Check loaded parameter shapes against the architecture.
///
/// Burn's record loader catches missing files and structural mismatches;
/// this covers same-structure records of a different width (e.g. a model
/// trained with another class count) and the class-table invariant.
fn validate_shapes<B: Backend>(
    model: &TrafficSignNet<B>,
    config: &TrafficSignNetConfig,
) -> Result<()> {
    let conv_in = model.block1.conv1.weight.val().dims();
    let expected_conv_in = [config.base_filters, config.in_channels, 3, 3];
    if conv_in != expected_conv_in {
        return Err(TrafficSignError::Model(format!(
            "input conv weight shape {:?} does not match architecture {:?}",
            conv_in, expected_conv_in
        )));
    }

    let head = model.fc2.weight.val().dims();
    let expected_head = [256, config.num_classes];
    if head != expected_head {
        return Err(TrafficSignError::Model(format!(
            "classifier head shape {:?} does not match architecture {:?}",
            head, expected_head
        )));
    }

    if CLASS_NAMES.len() != config.num_classes {
        return Err(TrafficSignError::Model(format!(
            "class table has {} entries but the classifier head is {} wide",
            CLASS_NAMES.len(),
            config.num_classes
        )));
    }

    Ok(())
}
