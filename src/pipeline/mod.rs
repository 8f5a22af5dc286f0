//! Pipeline stages for scan-to-report generation.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable: the layout state machine can
//! be exercised without producing a PDF, and the PDF writer without a model.
//!
//! ## Data Flow
//!
//! ```text
//! encode ──▶ gemini ──▶ layout ──▶ pdf
//! (base64)   (VLM)      (classify) (page-flow)
//! ```
//!
//! 1. [`encode`] — validate the uploaded bytes and re-encode as a base64 PNG
//!    attachment for the multimodal request body
//! 2. [`gemini`] — the only stage with network I/O: one `generateContent`
//!    call, plus the model-listing capability query
//! 3. [`layout`] — repair collapsed bullet runs, transliterate to a
//!    renderable charset, classify each line as Heading / Bullet / Plain
//! 4. [`pdf`]    — drive printpdf: fixed front matter, flowing body with
//!    automatic page breaks, footer page numbers, signature block

pub mod encode;
pub mod gemini;
pub mod layout;
pub mod pdf;
