//! Error types for the medscan-report library.
//!
//! Only genuinely fatal conditions surface as [`MedscanError`]: invalid
//! configuration or patient data, and PDF serialisation failures. Everything
//! that can go wrong while talking to the model (bad credential, network
//! failure, undecodable image, empty response) is deliberately NOT fatal —
//! [`crate::analyze::analyze`] folds those into an `"Error: …"` string that
//! flows through the same rendering path as a successful report, so the
//! caller always ends up with a printable document. The variants in the API
//! group below exist for the internal request path and for callers that use
//! the lower-level [`crate::pipeline::gemini`] functions directly.

use thiserror::Error;

/// All fatal errors returned by the medscan-report library.
#[derive(Debug, Error)]
pub enum MedscanError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The uploaded bytes could not be decoded as a raster image.
    #[error("Could not decode image '{filename}': {detail}\nSupported formats: PNG, JPEG.")]
    InvalidImage { filename: String, detail: String },

    /// Patient age is outside the accepted range.
    #[error("Patient age {age} is out of range (must be 0–120)")]
    AgeOutOfRange { age: u32 },

    /// A gender string could not be parsed.
    #[error("Unknown gender '{value}' (expected male, female, or other)")]
    UnknownGender { value: String },

    // ── API errors ────────────────────────────────────────────────────────
    /// The HTTP request itself failed (DNS, TLS, connection reset).
    #[error("Request to the model endpoint failed: {reason}\nCheck your internet connection.")]
    RequestFailed { reason: String },

    /// The endpoint answered with a non-success HTTP status.
    #[error("Model API error {status}: {body}")]
    ApiStatus { status: u16, body: String },

    /// The response decoded but carried no usable text candidate.
    #[error("Model response contained no text for model '{model}'")]
    EmptyResponse { model: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// printpdf failed to register a builtin font or serialise the document.
    #[error("PDF generation failed: {detail}")]
    PdfError { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
