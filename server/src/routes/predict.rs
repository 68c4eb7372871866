//! Prediction endpoint
//!
//! Accepts a multipart upload, runs one blocking forward pass, and
//! responds with a page showing the uploaded image, the predicted label,
//! and the confidence as a percentage. Decode failures fail the single
//! request; the loaded model itself is never touched.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
};
use base64::Engine;
use tracing::{debug, warn};

use trafficsign_net::PredictionResult;

use crate::state::SharedState;

/// POST /predict - Classify an uploaded image
pub async fn predict(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Html<String>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid upload: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("failed to read upload: {}", e)))?;

        debug!("Received upload of {} bytes", bytes.len());

        let image = image::load_from_memory(&bytes).map_err(|e| {
            warn!("Rejecting undecodable upload: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("could not decode image: {}", e),
            )
        })?;

        let result = state.predictor.predict_image(&image).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("inference failed: {}", e),
            )
        })?;

        debug!(
            "Predicted '{}' at {} in {:.2} ms",
            result.class_name, result.confidence, result.inference_time_ms
        );

        return Ok(Html(render_result_page(
            &bytes,
            content_type.as_deref(),
            &result,
        )));
    }

    Err((
        StatusCode::BAD_REQUEST,
        "missing 'image' form field".to_string(),
    ))
}

/// Build the result page: uploaded image (inlined as a data URI), the
/// predicted label, and the confidence percentage.
fn render_result_page(
    image_bytes: &[u8],
    content_type: Option<&str>,
    result: &PredictionResult,
) -> String {
    let mime = content_type.unwrap_or("image/png");
    let encoded = base64::engine::general_purpose::STANDARD.encode(image_bytes);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Traffic Sign Recognition</title>
  <style>
    body {{ font-family: Arial, sans-serif; max-width: 640px; margin: 40px auto; padding: 0 16px; color: #2c3e50; }}
    img {{ max-width: 100%; border: 1px solid #ecf0f1; border-radius: 8px; }}
    .prediction {{ background: #eafaf1; border-left: 4px solid #2ecc71; padding: 12px 16px; margin-top: 16px; }}
    .confidence {{ background: #eaf2fa; border-left: 4px solid #3498db; padding: 12px 16px; margin-top: 8px; }}
  </style>
</head>
<body>
  <h1>🚦 Traffic Sign Recognition</h1>
  <img src="data:{mime};base64,{encoded}" alt="Uploaded Image">
  <p class="prediction"><strong>Prediction:</strong> {label}</p>
  <p class="confidence"><strong>Confidence:</strong> {confidence}</p>
  <p><a href="/">Classify another image</a></p>
</body>
</html>
"#,
        mime = mime,
        encoded = encoded,
        label = result.class_name,
        confidence = result.confidence_percent(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use trafficsign_net::NUM_CLASSES;

    #[test]
    fn test_result_page_shows_label_and_percentage() {
        let mut probs = vec![0.0; NUM_CLASSES];
        probs[14] = 0.9175;
        let result = PredictionResult::new(probs, Duration::from_millis(12), None);

        let page = render_result_page(&[1, 2, 3], Some("image/jpeg"), &result);

        assert!(page.contains("Stop"));
        assert!(page.contains("91.75%"));
        assert!(page.contains("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_result_page_defaults_mime() {
        let probs = vec![1.0 / NUM_CLASSES as f32; NUM_CLASSES];
        let result = PredictionResult::new(probs, Duration::from_millis(1), None);

        let page = render_result_page(&[0xff], None, &result);
        assert!(page.contains("data:image/png;base64,"));
    }
}
