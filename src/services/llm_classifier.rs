//! Language-model classifier adapter
//!
//! Sends the query plus the closed taxonomy to the external service and
//! repairs whatever comes back. Failures are returned as `LlmFailure` so the
//! orchestrator can count them and fall back locally; they never reach the
//! caller of `understand`.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::llm::{LlmClient, parse_response, repair};
use crate::models::classification::{ClassificationResult, QueryCategory};
use crate::models::entity::Sport;

static SYSTEM_PROMPT: Lazy<String> = Lazy::new(|| {
    let categories: Vec<&str> = QueryCategory::ALL.iter().map(|c| c.as_str()).collect();
    let sports: Vec<&str> = Sport::ALL.iter().map(|s| s.as_str()).collect();
    format!(
        "You classify sports questions. Reply with a single JSON object and nothing else.\n\
         Schema: {{\"category\": string, \"sport\": string, \"confidence\": number between 0 and 1, \
         \"entities\": [{{\"type\": \"PLAYER|TEAM|MATCH|LEAGUE|UNKNOWN\", \"name\": string, \"confidence\": number}}], \
         \"needs_realtime\": boolean, \"needs_api_data\": boolean, \"is_betting_related\": boolean, \
         \"reasoning\": string}}\n\
         category must be one of: {}\n\
         sport must be one of: {}",
        categories.join(", "),
        sports.join(", ")
    )
});

/// Why a language-model call produced no classification
#[derive(Debug, Clone, PartialEq)]
pub enum LlmFailure {
    Disabled,
    Transport(String),
    Timeout,
    Parse(String),
}

impl LlmFailure {
    /// Metric label
    pub fn outcome(&self) -> &'static str {
        match self {
            LlmFailure::Disabled => "disabled",
            LlmFailure::Transport(_) => "transport_error",
            LlmFailure::Timeout => "timeout",
            LlmFailure::Parse(_) => "parse_error",
        }
    }
}

impl std::fmt::Display for LlmFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmFailure::Disabled => write!(f, "language model disabled"),
            LlmFailure::Transport(e) => write!(f, "transport error: {}", e),
            LlmFailure::Timeout => write!(f, "timed out"),
            LlmFailure::Parse(e) => write!(f, "unparsable response: {}", e),
        }
    }
}

pub struct LlmClassifier {
    client: Option<Arc<dyn LlmClient>>,
    timeout: Duration,
}

impl LlmClassifier {
    pub fn new(client: Option<Arc<dyn LlmClient>>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Classify through the external service within the configured timeout
    pub async fn classify(&self, query: &str) -> Result<ClassificationResult, LlmFailure> {
        let client = self.client.as_ref().ok_or(LlmFailure::Disabled)?;

        let text = match tokio::time::timeout(self.timeout, client.complete(&SYSTEM_PROMPT, query)).await {
            Err(_) => return Err(LlmFailure::Timeout),
            Ok(Err(AppError::Timeout(_))) => return Err(LlmFailure::Timeout),
            Ok(Err(e)) => return Err(LlmFailure::Transport(e.to_string())),
            Ok(Ok(text)) => text,
        };

        let raw = parse_response(&text).map_err(|e| {
            warn!("Language model returned unusable output: {}", e);
            LlmFailure::Parse(e.to_string())
        })?;
        let result = repair(&raw);
        debug!("Language model classified {:?} as {} ({:.2})", query, result.category, result.confidence);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::MockLlmClient;
    use crate::models::classification::ClassificationStage;

    fn classifier(mock: MockLlmClient) -> LlmClassifier {
        LlmClassifier::new(Some(Arc::new(mock)), Duration::from_millis(500))
    }

    #[test]
    fn test_prompt_lists_taxonomy() {
        for category in QueryCategory::ALL {
            assert!(SYSTEM_PROMPT.contains(category.as_str()));
        }
        assert!(SYSTEM_PROMPT.contains("hockey"));
    }

    #[tokio::test]
    async fn test_disabled() {
        let classifier = LlmClassifier::new(None, Duration::from_millis(500));
        assert!(!classifier.is_enabled());
        assert_eq!(classifier.classify("q").await, Err(LlmFailure::Disabled));
    }

    #[tokio::test]
    async fn test_successful_classification_is_repaired() {
        let mut mock = MockLlmClient::new();
        mock.expect_complete()
            .returning(|_, _| Ok("```json\n{\"category\": \"TRANSFER\", \"confidence\": \"0.8\"}\n```".to_string()));

        let result = classifier(mock).classify("where will he sign").await.unwrap();
        assert_eq!(result.category, QueryCategory::Transfer);
        assert_eq!(result.stage, ClassificationStage::LanguageModel);
        assert!(result.entities.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error() {
        let mut mock = MockLlmClient::new();
        mock.expect_complete()
            .returning(|_, _| Err(AppError::Llm("connection refused".into())));

        let failure = classifier(mock).classify("q").await.unwrap_err();
        assert_eq!(failure.outcome(), "transport_error");
    }

    #[tokio::test]
    async fn test_client_timeout_maps_to_timeout() {
        let mut mock = MockLlmClient::new();
        mock.expect_complete()
            .returning(|_, _| Err(AppError::Timeout("deadline".into())));

        assert_eq!(classifier(mock).classify("q").await, Err(LlmFailure::Timeout));
    }

    #[tokio::test]
    async fn test_unparsable_output() {
        let mut mock = MockLlmClient::new();
        mock.expect_complete().returning(|_, _| Ok("no idea".to_string()));

        let failure = classifier(mock).classify("q").await.unwrap_err();
        assert_eq!(failure.outcome(), "parse_error");
    }
}
