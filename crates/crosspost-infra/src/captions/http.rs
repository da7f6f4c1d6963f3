//! HTTP caption backend.
//!
//! Posts the caption prompt to a configured text-generation endpoint and
//! expects a JSON body of the form `{"captions": ["...", ...]}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crosspost_core::ports::{CaptionError, CaptionService};

/// Caption service backed by a remote text-generation endpoint.
pub struct HttpCaptionService {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct CaptionRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct CaptionResponse {
    captions: Vec<String>,
}

impl HttpCaptionService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn prompt_for(topic: &str) -> String {
        format!(
            "Generate 3 diverse and engaging social media captions for a post \
             about: \"{topic}\". The captions should be short, punchy, and \
             include relevant hashtags."
        )
    }
}

#[async_trait]
impl CaptionService for HttpCaptionService {
    async fn generate(&self, topic: &str) -> Result<Vec<String>, CaptionError> {
        let prompt = Self::prompt_for(topic);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CaptionRequest { prompt: &prompt })
            .send()
            .await
            .map_err(|e| CaptionError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| CaptionError::Unavailable(e.to_string()))?;

        let body: CaptionResponse = response
            .json()
            .await
            .map_err(|e| CaptionError::InvalidResponse(e.to_string()))?;

        if body.captions.is_empty() {
            return Err(CaptionError::InvalidResponse(
                "endpoint returned no captions".to_string(),
            ));
        }

        tracing::debug!(count = body.captions.len(), "Captions generated");
        Ok(body.captions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_body_shape() {
        let body: CaptionResponse =
            serde_json::from_str(r#"{"captions": ["one #a", "two #b", "three #c"]}"#).unwrap();
        assert_eq!(body.captions.len(), 3);

        let malformed = serde_json::from_str::<CaptionResponse>(r#"{"suggestions": []}"#);
        assert!(malformed.is_err());
    }

    #[test]
    fn test_prompt_names_the_topic() {
        let prompt = HttpCaptionService::prompt_for("street food");
        assert!(prompt.contains("\"street food\""));
        assert!(prompt.contains("hashtags"));
    }
}
