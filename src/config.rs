//! Configuration for the analysis request.
//!
//! Everything the remote call needs lives in one [`AnalysisConfig`], built via
//! its [`AnalysisConfigBuilder`]. There is intentionally no retry count, no
//! backoff, and no timeout knob: each user action maps to exactly one
//! best-effort `generateContent` call, and a failure degrades to renderable
//! text rather than being retried.

use crate::error::MedscanError;

/// Default Gemini model when the caller names none.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default API base URL (override for self-hosted proxies or tests).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for a scan analysis request.
///
/// Built via [`AnalysisConfig::builder()`].
///
/// # Example
/// ```rust
/// use medscan_report::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .api_key("AIza…")
///     .model("gemini-1.5-pro")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Google API key. Required; never logged.
    pub api_key: String,

    /// Model identifier, e.g. "gemini-1.5-flash". Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// API base URL. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,
}

impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key redacted: config structs end up in logs
        f.debug_struct("AnalysisConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl AnalysisConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, MedscanError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                MedscanError::InvalidConfig(
                    "API key is required (set GEMINI_API_KEY or pass --api-key)".into(),
                )
            })?;
        if self.model.trim().is_empty() {
            return Err(MedscanError::InvalidConfig("Model name must not be empty".into()));
        }
        Ok(AnalysisConfig {
            api_key,
            model: self.model,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = AnalysisConfig::builder().api_key("k").build().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_api_key_rejected() {
        let err = AnalysisConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn blank_api_key_rejected() {
        assert!(AnalysisConfig::builder().api_key("   ").build().is_err());
    }

    #[test]
    fn trailing_slash_stripped() {
        let config = AnalysisConfig::builder()
            .api_key("k")
            .base_url("http://localhost:8080/v1beta/")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1beta");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AnalysisConfig::builder().api_key("secret").build().unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
