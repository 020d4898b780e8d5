//! Query pipeline: KB lookup, then provider enrichment on a miss, then
//! normalization and validation with a single repair pass.

use crate::config::AppConfig;
use crate::error::PairingError;
use crate::kb::{configured_knowledge_base, KnowledgeBase, KB_TOOL_NAME};
use crate::providers::{
    build_system_prompt, CompletionRequest, FallbackProvider, LlmProvider, ProviderRepairer,
};
use crate::schema::{validate, validate_with_repair, PairingResponse};
use crate::session::ChatHistory;
use log::{info, warn};

/// Where a recommendation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    KnowledgeBase,
    Provider(String),
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub response: PairingResponse,
    /// Model text (or the KB response as JSON) that produced `response`
    pub raw: String,
    pub origin: Origin,
}

impl Recommendation {
    /// Text to append to the pairings log. A raw answer that needed repair
    /// is replaced by the validated response so the card stays structured.
    pub fn log_text(&self) -> String {
        if validate(&self.raw).is_ok() {
            self.raw.clone()
        } else {
            self.response.to_json_pretty()
        }
    }
}

pub struct Recommender {
    kb: KnowledgeBase,
    provider: Result<Box<dyn LlmProvider>, String>,
}

impl Recommender {
    pub fn new(kb: KnowledgeBase, provider: Box<dyn LlmProvider>) -> Self {
        Recommender {
            kb,
            provider: Ok(provider),
        }
    }

    /// Recommender that can only answer curated events.
    pub fn kb_only(kb: KnowledgeBase) -> Self {
        Recommender {
            kb,
            provider: Err("no provider configured".to_string()),
        }
    }

    /// Build from configuration. A provider that cannot be initialised (for
    /// instance a missing API key) leaves the recommender answering from the
    /// knowledge base only.
    pub fn from_config(config: &AppConfig) -> Result<Self, PairingError> {
        let kb = configured_knowledge_base(config)?;

        let provider = FallbackProvider::new(config)
            .map(|p| Box::new(p) as Box<dyn LlmProvider>)
            .map_err(|e| {
                warn!("No LLM provider available, answering from the KB only: {}", e);
                e.to_string()
            });

        Ok(Recommender { kb, provider })
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// `pairing_kb` results for every curated event named in the query.
    fn kb_context(&self, query: &str) -> Option<String> {
        let normalized = query.trim().to_lowercase();
        let results: Vec<String> = self
            .kb
            .event_names()
            .filter(|name| normalized.contains(name))
            .map(|name| self.kb.tool_response(name))
            .collect();

        if results.is_empty() {
            None
        } else {
            Some(results.join("\n"))
        }
    }

    /// Resolve one query to a validated recommendation.
    pub async fn recommend(
        &self,
        query: &str,
        history: &ChatHistory,
    ) -> Result<Recommendation, PairingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PairingError::EmptyQuery);
        }

        if let Some(record) = self.kb.lookup(query) {
            info!("Answering '{}' from the knowledge base", query);
            let response = PairingResponse::from_kb_record(query, record);
            return Ok(Recommendation {
                raw: response.to_json_pretty(),
                response,
                origin: Origin::KnowledgeBase,
            });
        }

        let provider = self.provider.as_ref().map_err(|reason| {
            PairingError::ProviderError(format!(
                "'{}' is not a curated event and {}",
                query, reason
            ))
        })?;

        let user_message = match self.kb_context(query) {
            Some(context) => format!(
                "{}\n\n{} results:\n{}",
                query, KB_TOOL_NAME, context
            ),
            None => query.to_string(),
        };

        let request = CompletionRequest::new(build_system_prompt(self.kb.event_names()))
            .with_history(history)
            .user(user_message);

        let raw = provider
            .complete(&request)
            .await
            .map_err(|e| PairingError::ProviderError(e.to_string()))?
            .flatten();

        if raw.trim().is_empty() {
            return Err(PairingError::ProviderError(format!(
                "empty output from {}",
                provider.provider_name()
            )));
        }

        let repairer = ProviderRepairer::new(provider.as_ref());
        let response = validate_with_repair(&raw, &repairer).await?;

        Ok(Recommendation {
            response,
            raw,
            origin: Origin::Provider(provider.provider_name().to_string()),
        })
    }
}
