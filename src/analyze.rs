//! Analysis entry points.
//!
//! [`analyze`] is the uniform-output requester: whatever goes wrong — an
//! undecodable upload, a bad credential, a network failure, an empty model
//! response — the caller receives a `String` that the renderer can lay out.
//! Failures come back prefixed `"Error: "` and flow through the exact same
//! PDF path as a successful analysis; there is no separate error channel
//! downstream of this function.

use crate::config::AnalysisConfig;
use crate::error::MedscanError;
use crate::pipeline::{encode, gemini};
use crate::prompts::ANALYSIS_PROMPT;
use tracing::{info, warn};

/// Analyse one scan image; always returns renderable text.
///
/// `image_filename` is the upload's original name, used in diagnostics so a
/// decode failure names the actual file. On success: the model's response
/// exactly as returned, no post-processing. On any failure: a human-readable
/// `"Error: …"` string. One best-effort call — no retries, no timeout knob.
pub async fn analyze(image_bytes: &[u8], image_filename: &str, config: &AnalysisConfig) -> String {
    match try_analyze(image_bytes, image_filename, config).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Analysis failed: {e}");
            format!("Error: {e}")
        }
    }
}

/// Fallible variant for callers that want to branch on failure instead of
/// rendering the error into the report.
pub async fn try_analyze(
    image_bytes: &[u8],
    image_filename: &str,
    config: &AnalysisConfig,
) -> Result<String, MedscanError> {
    let encoded = encode::encode_image(image_bytes, image_filename)?;
    info!("Submitting scan to model '{}'", config.model);
    gemini::generate_content(&encoded, ANALYSIS_PROMPT, config).await
}

/// Synchronous wrapper around [`analyze`].
///
/// Creates a temporary tokio runtime internally.
pub fn analyze_sync(image_bytes: &[u8], image_filename: &str, config: &AnalysisConfig) -> String {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(analyze(image_bytes, image_filename, config)),
        Err(e) => format!("Error: failed to create tokio runtime: {e}"),
    }
}

/// List the models that support `generateContent` for this credential.
///
/// Failures are reported as a diagnostic and yield an empty list; model
/// discovery never crashes the configuration step.
pub async fn list_models(config: &AnalysisConfig) -> Vec<String> {
    gemini::list_generate_content_models(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn undecodable_image_folds_to_error_string() {
        let config = AnalysisConfig::builder().api_key("k").build().unwrap();
        let text = analyze(b"definitely not an image", "scan.png", &config).await;
        assert!(text.starts_with("Error: "), "got: {text}");
    }

    #[tokio::test]
    async fn decode_failure_names_the_uploaded_file() {
        let config = AnalysisConfig::builder().api_key("k").build().unwrap();
        let text = analyze(b"definitely not an image", "chest_ct.png", &config).await;
        assert!(text.contains("chest_ct.png"), "got: {text}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_folds_to_error_string() {
        // Discard-port on localhost: connection refused immediately, no real traffic.
        let config = AnalysisConfig::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:9/v1beta")
            .build()
            .unwrap();
        let png = {
            use image::{DynamicImage, Rgba, RgbaImage};
            let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
            let mut buf = Vec::new();
            img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
                .unwrap();
            buf
        };
        let text = analyze(&png, "scan.png", &config).await;
        assert!(text.starts_with("Error: "), "got: {text}");
    }
}
