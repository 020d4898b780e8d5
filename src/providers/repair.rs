use crate::providers::{build_repair_prompt, CompletionRequest, LlmProvider};
use crate::schema::Repairer;
use async_trait::async_trait;
use log::debug;
use std::error::Error;

/// Uses an LLM provider as the one-shot schema repair collaborator.
pub struct ProviderRepairer<'a> {
    provider: &'a dyn LlmProvider,
}

impl<'a> ProviderRepairer<'a> {
    pub fn new(provider: &'a dyn LlmProvider) -> Self {
        ProviderRepairer { provider }
    }
}

#[async_trait]
impl Repairer for ProviderRepairer<'_> {
    async fn repair(
        &self,
        malformed: &str,
        reason: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        debug!(
            "Asking {} to repair output ({})",
            self.provider.provider_name(),
            reason
        );

        let request = CompletionRequest::new(build_repair_prompt()).user(format!(
            "Validation error: {}\n\nText to fix:\n{}",
            reason, malformed
        ));

        let output = self.provider.complete(&request).await?;
        Ok(output.flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::OpenAIProvider;
    use crate::schema::validate_with_repair;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_repair_round_trip_through_provider() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Regex("Text to fix".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"content": "{\"event\": \"picnic\", \"menu\": {}, \"drinks\": {}, \"rationale\": \"Easy to carry.\"}"}}]}"#,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let repairer = ProviderRepairer::new(&provider);

        let response = validate_with_repair("event: picnic, food: sandwiches", &repairer)
            .await
            .unwrap();
        assert_eq!(response.event, "picnic");
        assert_eq!(response.rationale, "Easy to carry.");
        mock.assert_async().await;
    }
}
