//! Gemini REST interaction: one `generateContent` call per analysis, plus the
//! model-listing capability query.
//!
//! Deliberately thin — prompt engineering lives in [`crate::prompts`] and
//! error-folding policy in [`crate::analyze`]. There are no retries and no
//! exposed timeout: each user action is a single best-effort call whose
//! failure degrades to renderable text downstream.

use crate::config::AnalysisConfig;
use crate::error::MedscanError;
use crate::pipeline::encode::EncodedImage;
use serde::Deserialize;
use tracing::{debug, warn};

// ── Response types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

// ── generateContent ──────────────────────────────────────────────────────

/// Submit one multimodal request: {instruction text, inline image}.
///
/// Returns the model's raw text exactly as returned, with multi-part
/// candidates concatenated. Any failure becomes a [`MedscanError`]; the
/// public [`crate::analyze::analyze`] wrapper folds it into the uniform
/// `"Error: …"` string.
pub async fn generate_content(
    image: &EncodedImage,
    instruction: &str,
    config: &AnalysisConfig,
) -> Result<String, MedscanError> {
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        config.base_url, config.model, config.api_key
    );

    let body = serde_json::json!({
        "contents": [{
            "parts": [
                { "text": instruction },
                {
                    "inline_data": {
                        "mime_type": image.mime_type,
                        "data": image.data
                    }
                }
            ]
        }]
    });

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| MedscanError::RequestFailed { reason: e.to_string() })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MedscanError::ApiStatus {
            status: status.as_u16(),
            body,
        });
    }

    let decoded: GenerateContentResponse = response
        .json()
        .await
        .map_err(|e| MedscanError::RequestFailed {
            reason: format!("could not decode response: {e}"),
        })?;

    let text = extract_text(&decoded);
    if text.is_empty() {
        return Err(MedscanError::EmptyResponse {
            model: config.model.clone(),
        });
    }

    debug!("Model '{}' returned {} chars", config.model, text.len());
    Ok(text)
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

// ── Model listing ────────────────────────────────────────────────────────

/// Capability query: which models support `generateContent`?
///
/// Returns clean model names with the `models/` prefix stripped. Any failure
/// is reported as a `warn!` diagnostic and yields an empty list — model
/// discovery must never crash the configuration step.
pub async fn list_generate_content_models(config: &AnalysisConfig) -> Vec<String> {
    match try_list_models(config).await {
        Ok(models) => models,
        Err(e) => {
            warn!("Error fetching models: {e}");
            Vec::new()
        }
    }
}

async fn try_list_models(config: &AnalysisConfig) -> Result<Vec<String>, MedscanError> {
    let url = format!("{}/models?key={}", config.base_url, config.api_key);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| MedscanError::RequestFailed { reason: e.to_string() })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MedscanError::ApiStatus {
            status: status.as_u16(),
            body,
        });
    }

    let decoded: ListModelsResponse = response
        .json()
        .await
        .map_err(|e| MedscanError::RequestFailed {
            reason: format!("could not decode model list: {e}"),
        })?;

    Ok(filter_vision_models(decoded))
}

fn filter_vision_models(response: ListModelsResponse) -> Vec<String> {
    response
        .models
        .into_iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
        })
        .map(|m| m.name.trim_start_matches("models/").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r###"{"candidates":[{"content":{"parts":[{"text":"## 1. Scan"},{"text":" Type"}]}}]}"###,
        )
        .unwrap();
        assert_eq!(extract_text(&response), "## 1. Scan Type");
    }

    #[test]
    fn extract_text_empty_candidates() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(&response), "");
    }

    #[test]
    fn extract_text_missing_candidates_field() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(&response), "");
    }

    #[test]
    fn filter_keeps_generate_content_models_only() {
        let response: ListModelsResponse = serde_json::from_str(
            r#"{"models":[
                {"name":"models/gemini-1.5-flash","supportedGenerationMethods":["generateContent","countTokens"]},
                {"name":"models/embedding-001","supportedGenerationMethods":["embedContent"]}
            ]}"#,
        )
        .unwrap();
        let models = filter_vision_models(response);
        assert_eq!(models, vec!["gemini-1.5-flash".to_string()]);
    }

    #[test]
    fn filter_tolerates_missing_methods() {
        let response: ListModelsResponse =
            serde_json::from_str(r#"{"models":[{"name":"models/x"}]}"#).unwrap();
        assert!(filter_vision_models(response).is_empty());
    }
}
