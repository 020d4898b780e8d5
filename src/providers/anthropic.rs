use crate::config::ProviderConfig;
use crate::normalize::ModelOutput;
use crate::providers::{CompletionRequest, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, Box<dyn Error>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or("ANTHROPIC_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(AnthropicProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.2,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<ModelOutput, Box<dyn Error + Send + Sync>> {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|turn| json!({"role": turn.role.as_str(), "content": turn.content}))
            .collect();

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": request.system,
                "messages": messages
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Anthropic response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_type = error["type"].as_str().unwrap_or("unknown");
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(format!("Anthropic API error ({}): {}", error_type, error_message).into());
        }

        // Content arrives as a list of segments; the normalizer keeps the text ones
        let content = response_body
            .get("content")
            .cloned()
            .ok_or("Failed to extract content from Anthropic response")?;

        Ok(ModelOutput::from_value(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn config(api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: 0.2,
            max_tokens: 2000,
            api_key: api_key.map(str::to_string),
            base_url: None,
        }
    }

    #[tokio::test]
    async fn test_complete_flattens_text_segments() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "system": "be helpful",
                "messages": [{"role": "user", "content": "pizza night"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "model": "claude-3-5-sonnet-20241022",
                    "content": [
                        {"type": "text", "text": "{\"event\": \"pizza night\","},
                        {"type": "text", "text": "\"menu\": {}}"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "claude-3-5-sonnet-20241022".to_string(),
        );
        let request = CompletionRequest::new("be helpful").user("pizza night");

        let output = provider.complete(&request).await.unwrap();
        assert_eq!(
            output.flatten(),
            "{\"event\": \"pizza night\",\n\"menu\": {}}"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "claude-3-5-sonnet-20241022".to_string(),
        );
        let request = CompletionRequest::new("system").user("hi");

        let err = provider.complete(&request).await.unwrap_err();
        assert!(err.to_string().contains("overloaded_error"));
        mock.assert_async().await;
    }

    #[test]
    fn test_new_with_configured_key() {
        let provider = AnthropicProvider::new(&config(Some("test-key")), Duration::from_secs(5));
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "anthropic");
    }
}
