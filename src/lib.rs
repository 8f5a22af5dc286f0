//! # medscan-report
//!
//! Analyse medical scan images with a multimodal LLM and render structured
//! diagnostic PDF reports.
//!
//! ## What this crate does
//!
//! The "intelligence" lives entirely in a remote vision model: the crate sends
//! one scan image plus a fixed radiologist instruction to the Gemini
//! `generateContent` endpoint and gets back loosely markdown-structured text.
//! The bespoke part is everything around that call — a prompt template that
//! constrains the output format, and a deterministic layout engine that turns
//! the model's heading/bullet text (of uncertain formatting) into a paginated,
//! styled PDF with patient metadata, headers, footers, and a signature block.
//!
//! ## Pipeline Overview
//!
//! ```text
//! scan image
//!  │
//!  ├─ 1. Encode   decode + re-encode PNG, base64 attachment
//!  ├─ 2. Model    one generateContent call (text on success, "Error: …" on failure)
//!  ├─ 3. Layout   normalise bullet runs, classify Heading / Bullet / Plain
//!  └─ 4. PDF      printpdf page-flow: front matter, body, signature, page breaks
//! ```
//!
//! A failed analysis does not raise: the `"Error: …"` string is ordinary
//! report text and flows through the same rendering path, so the caller always
//! gets a printable document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medscan_report::{analyze, render_report, AnalysisConfig, Gender, PatientMetadata};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig::builder()
//!         .api_key(std::env::var("GEMINI_API_KEY")?)
//!         .model("gemini-1.5-flash")
//!         .build()?;
//!
//!     let image = std::fs::read("chest_ct.png")?;
//!     let text = analyze(&image, "chest_ct.png", &config).await;
//!
//!     let patient = PatientMetadata::new("John Doe", 45, Gender::Male)?;
//!     let pdf = render_report(&text, &patient, "chest_ct.png")?;
//!     std::fs::write(patient.report_filename(), pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `medscan` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! medscan-report = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod patient;
pub mod pipeline;
pub mod prompts;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, analyze_sync, list_models};
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use error::MedscanError;
pub use patient::{Gender, PatientMetadata};
pub use report::{render_report, render_report_on};
