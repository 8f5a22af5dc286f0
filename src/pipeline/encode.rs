//! Image encoding: uploaded bytes → base64 PNG attachment.
//!
//! The Gemini API accepts images as base64 `inline_data` parts in the JSON
//! request body. Uploads arrive as whatever the user had on disk (JPEG, PNG,
//! mixed quality), so the bytes are decoded first — catching corrupt files
//! before any network round-trip — and re-encoded as PNG. PNG is chosen over
//! JPEG because it is lossless: compression artefacts on fine tissue detail
//! are exactly what a diagnostic model must not be shown.

use crate::error::MedscanError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// A validated image ready to attach to the multimodal request.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Base64 of the PNG re-encoding.
    pub data: String,
    /// Always `image/png` after re-encoding.
    pub mime_type: &'static str,
}

/// Decode the uploaded bytes and re-encode as a base64 PNG attachment.
///
/// Fails only on undecodable input; the caller folds that failure into the
/// uniform `"Error: …"` text path.
pub fn encode_image(bytes: &[u8], filename: &str) -> Result<EncodedImage, MedscanError> {
    let img = image::load_from_memory(bytes).map_err(|e| MedscanError::InvalidImage {
        filename: filename.to_string(),
        detail: e.to_string(),
    })?;

    let encoded = encode_png(&img).map_err(|e| MedscanError::InvalidImage {
        filename: filename.to_string(),
        detail: format!("PNG re-encoding failed: {e}"),
    })?;

    debug!("Encoded '{}' → {} bytes base64", filename, encoded.data.len());
    Ok(encoded)
}

fn encode_png(img: &DynamicImage) -> Result<EncodedImage, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(EncodedImage {
        data: STANDARD.encode(&buf),
        mime_type: "image/png",
    })
}
