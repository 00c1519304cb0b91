use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use super::{GEMINI_API_KEY, RagError};

// The same task type is used for documents and queries, so both land in the
// same embedding space.
const EMBEDDING_TASK_TYPE: &str = "RETRIEVAL_DOCUMENT";

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: EmbedContent<'a>,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

#[derive(Serialize)]
struct EmbedContent<'a> {
    parts: Vec<EmbedPart<'a>>,
}

#[derive(Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub api_key: String,
    pub model: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
}

impl EmbeddingsClientConfig {
    pub fn from_env(model: &str) -> Result<Self, RagError> {
        let api_key =
            env::var(GEMINI_API_KEY).map_err(|_| RagError::MissingCredential(GEMINI_API_KEY))?;

        Ok(Self {
            api_key,
            model: model.to_string(),
            max_retries: 3,
            timeout_secs: 30,
            backoff_factor: 1.5,
        })
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl EmbeddingsClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, RagError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RagError::Embedding(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn from_env(model: &str) -> Result<Self, RagError> {
        Self::new(EmbeddingsClientConfig::from_env(model)?)
    }

    fn endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:embedContent",
            self.config.model
        )
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        let request = EmbedContentRequest {
            model: format!("models/{}", self.config.model),
            content: EmbedContent {
                parts: vec![EmbedPart { text }],
            },
            task_type: EMBEDDING_TASK_TYPE,
        };

        self.send_request(&request).await
    }

    async fn send_request(
        &self,
        request: &EmbedContentRequest<'_>,
    ) -> Result<Vec<f32>, RagError> {
        let mut attempts = 0;
        let mut last_error = None;

        loop {
            attempts += 1;

            match self.execute_request(request).await {
                Ok(values) => return Ok(values),
                Err(e) => {
                    last_error = Some(e);

                    if attempts > self.config.max_retries {
                        break;
                    }

                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );

                    tokio::time::sleep(backoff_time).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RagError::Embedding("Max retries exceeded".to_string())))
    }

    async fn execute_request(
        &self,
        request: &EmbedContentRequest<'_>,
    ) -> Result<Vec<f32>, RagError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RagError::Embedding(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Embedding(format!("{}: {}", status, body)));
        }

        let parsed = response
            .json::<EmbedContentResponse>()
            .await
            .map_err(|e| RagError::Embedding(e.to_string()))?;

        Ok(parsed.embedding.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_api_shape() {
        let request = EmbedContentRequest {
            model: "models/text-embedding-004".to_string(),
            content: EmbedContent {
                parts: vec![EmbedPart {
                    text: "Hello world",
                }],
            },
            task_type: EMBEDDING_TASK_TYPE,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "models/text-embedding-004");
        assert_eq!(json["content"]["parts"][0]["text"], "Hello world");
        assert_eq!(json["taskType"], "RETRIEVAL_DOCUMENT");
    }

    #[test]
    fn response_parses_embedding_values() {
        let body = r#"{"embedding": {"values": [0.1, -0.25, 0.5]}}"#;
        let parsed: EmbedContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.embedding.values, vec![0.1, -0.25, 0.5]);
    }
}
