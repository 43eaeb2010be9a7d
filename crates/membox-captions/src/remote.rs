//! Remote caption generator backed by an external HTTP captioning API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use membox_core::CaptionApiConfig;

use crate::{Caption, CaptionError, CaptionGenerator, NUM_CAPTIONS};

/// Remote caption generator.
///
/// Issues one POST per request with bearer-token auth. The call carries an
/// explicit timeout so a stalled upstream cannot hold the request open
/// indefinitely; a timeout surfaces like any other upstream failure.
pub struct RemoteCaptioner {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct CaptionApiRequest<'a> {
    image_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
    num_captions: usize,
}

impl RemoteCaptioner {
    pub fn new(config: &CaptionApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for caption API")?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CaptionGenerator for RemoteCaptioner {
    async fn generate(
        &self,
        image_url: &str,
        context: Option<&str>,
    ) -> Result<Vec<Caption>, CaptionError> {
        let body = CaptionApiRequest {
            image_url,
            context,
            num_captions: NUM_CAPTIONS,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CaptionError::Upstream(format!("Caption API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %error_text,
                "Caption API returned an error"
            );
            return Err(CaptionError::Upstream(
                "Failed to generate captions from external API".to_string(),
            ));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| CaptionError::InvalidResponse(e.to_string()))?;

        Ok(normalize_captions(&value))
    }
}

/// Extract captions from an API response body.
///
/// The sequence is read from `captions`, or else `data` (first non-empty
/// field wins, defaulting to empty). Elements are bare strings or objects
/// with a `text` field; anything else is skipped. Ids are reassigned 1-based
/// in array order.
pub fn normalize_captions(value: &Value) -> Vec<Caption> {
    let empty = Vec::new();
    let items = value
        .get("captions")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .or_else(|| {
            value
                .get("data")
                .and_then(Value::as_array)
                .filter(|items| !items.is_empty())
        })
        .unwrap_or(&empty);

    items
        .iter()
        .filter_map(caption_text)
        .enumerate()
        .map(|(index, text)| Caption {
            id: index as u32 + 1,
            text,
        })
        .collect()
}

fn caption_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => fields.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_bare_strings() {
        let captions = normalize_captions(&json!({ "captions": ["a", "b"] }));
        assert_eq!(
            captions,
            vec![
                Caption { id: 1, text: "a".to_string() },
                Caption { id: 2, text: "b".to_string() },
            ]
        );
    }

    #[test]
    fn test_normalize_text_objects() {
        let captions = normalize_captions(&json!({
            "captions": [{ "text": "first" }, { "text": "second" }]
        }));
        assert_eq!(captions[0].text, "first");
        assert_eq!(captions[1].id, 2);
    }

    #[test]
    fn test_data_field_fallback() {
        let captions = normalize_captions(&json!({ "data": ["from data"] }));
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].text, "from data");
    }

    #[test]
    fn test_empty_captions_falls_back_to_data() {
        let captions = normalize_captions(&json!({ "captions": [], "data": ["d"] }));
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].text, "d");
    }

    #[test]
    fn test_missing_fields_yield_empty() {
        assert!(normalize_captions(&json!({ "other": 1 })).is_empty());
        assert!(normalize_captions(&json!(null)).is_empty());
    }

    #[test]
    fn test_malformed_elements_are_skipped() {
        let captions = normalize_captions(&json!({
            "captions": ["keep", 42, { "no_text": true }, { "text": "also keep" }]
        }));
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].text, "keep");
        assert_eq!(captions[1], Caption { id: 2, text: "also keep".to_string() });
    }

    #[test]
    fn test_request_body_shape() {
        let body = CaptionApiRequest {
            image_url: "https://example.com/i.png",
            context: Some("Monday"),
            num_captions: NUM_CAPTIONS,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["image_url"], "https://example.com/i.png");
        assert_eq!(value["context"], "Monday");
        assert_eq!(value["num_captions"], 10);

        let body = CaptionApiRequest {
            image_url: "u",
            context: None,
            num_captions: NUM_CAPTIONS,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("context").is_none());
    }
}
