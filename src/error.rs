use thiserror::Error;

/// Errors that can occur while producing or recording a pairing recommendation
#[derive(Error, Debug)]
pub enum PairingError {
    /// Model text could not be coerced into a pairing response, even after repair
    #[error("Response does not match the pairing schema: {reason}")]
    SchemaViolation {
        reason: String,
        /// The original model text, kept for diagnostic display
        raw: String,
    },

    /// The repair collaborator itself failed before returning any text
    #[error("Repair pass failed: {reason}")]
    RepairFailed { reason: String, raw: String },

    /// The enrichment provider (or every provider in the fallback chain) failed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// A knowledge base file failed load-time verification
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    /// Query was blank after trimming
    #[error("Query cannot be empty")]
    EmptyQuery,

    /// Appending to the pairings log failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl PairingError {
    /// Raw model text attached to the error, if any.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            PairingError::SchemaViolation { raw, .. } | PairingError::RepairFailed { raw, .. } => {
                Some(raw)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_violation_keeps_raw_text() {
        let err = PairingError::SchemaViolation {
            reason: "missing field `menu`".to_string(),
            raw: "{\"event\": \"x\"}".to_string(),
        };
        assert_eq!(err.raw_text(), Some("{\"event\": \"x\"}"));
        assert!(err.to_string().contains("missing field `menu`"));
    }

    #[test]
    fn test_provider_error_has_no_raw_text() {
        let err = PairingError::ProviderError("timeout".to_string());
        assert!(err.raw_text().is_none());
        assert_eq!(err.to_string(), "Provider error: timeout");
    }
}
