use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, Result};

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// Sends a single-turn prompt to `generateContent` and returns the text of
/// the first candidate.
pub async fn generate_content(client: &Client, config: &Config, prompt: &str) -> Result<String> {
    let url = format!(
        "{}/models/{}:generateContent",
        config.gemini_base_url, config.gemini_model
    );
    let body = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    };

    tracing::debug!(
        model = %config.gemini_model,
        prompt_len = prompt.len(),
        "Sending request to Gemini API"
    );

    let res = client
        .post(&url)
        .query(&[("key", config.gemini_api_key.as_str())])
        .json(&body)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Gemini API returned an error status");
        return Err(AppError::UpstreamError {
            status: status.as_u16(),
            detail: "Failed to fetch animal information".to_string(),
        });
    }

    let json: serde_json::Value = res
        .json()
        .await
        .map_err(|e| AppError::ParseError(e.without_url().to_string()))?;

    extract_text(&json)
}

fn extract_text(json: &serde_json::Value) -> Result<String> {
    json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::ParseError("missing candidates[0].content.parts[0].text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_is_read_from_first_candidate() {
        let envelope = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Diet: fish" }], "role": "model" } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(extract_text(&envelope).unwrap(), "Diet: fish");
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        for envelope in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": 3 }] } }] }),
        ] {
            assert!(matches!(extract_text(&envelope), Err(AppError::ParseError(_))));
        }
    }
}
