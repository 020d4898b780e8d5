mod anthropic;
mod factory;
mod fallback;
mod open_ai;
mod prompt;
mod repair;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{
    build_repair_prompt, build_system_prompt, PAIRING_SYSTEM_PROMPT, REPAIR_PROMPT,
    RESPONSE_FORMAT,
};
pub use repair::ProviderRepairer;

use crate::normalize::ModelOutput;
use crate::session::{ChatHistory, ChatTurn, Role};
use async_trait::async_trait;
use std::error::Error;

/// A single chat completion request: system prompt plus ordered turns.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<ChatTurn>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>) -> Self {
        CompletionRequest {
            system: system.into(),
            messages: Vec::new(),
        }
    }

    /// Replay earlier turns of the session before the new message.
    pub fn with_history(mut self, history: &ChatHistory) -> Self {
        self.messages.extend(history.turns().iter().cloned());
        self
    }

    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatTurn {
            role: Role::User,
            content: content.into(),
        });
        self
    }
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Run one completion and hand back the raw, loosely-typed output
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<ModelOutput, Box<dyn Error + Send + Sync>>;
}
