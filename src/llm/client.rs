//! 语言模型客户端
//!
//! 支持 OpenAI 兼容的 chat-completions 接口与 Ollama `/api/chat` 接口，
//! 两者都要求模型只输出 JSON 对象。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::config::config::LlmConfig;
use crate::error::{AppError, Result};

/// 语言模型后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Ollama,
    Disabled,
}

impl LlmProvider {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "ollama" => Ok(LlmProvider::Ollama),
            "disabled" | "none" | "" => Ok(LlmProvider::Disabled),
            other => Err(AppError::Config(format!("未知的语言模型后端: {}", other))),
        }
    }

    /// 是否必须配置 API 密钥
    pub fn requires_api_key(&self) -> bool {
        matches!(self, LlmProvider::OpenAi)
    }
}

/// 语言模型客户端
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 发送系统提示与用户消息，返回模型输出的原始文本
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// HTTP 客户端
pub struct HttpLlmClient {
    client: reqwest::Client,
    provider: LlmProvider,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl HttpLlmClient {
    pub fn new(config: &LlmConfig, provider: LlmProvider) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms.max(1)))
            .build()?;

        Ok(Self {
            client,
            provider,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&serde_json::json!({
                "model": self.model,
                "temperature": 0,
                "response_format": { "type": "json_object" },
                "messages": [
                    { "role": "system", "content": system },
                    { "role": "user", "content": user }
                ]
            }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!("chat completion failed ({}): {}", status, error_text)));
        }

        let body: OpenAiResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Llm("chat completion returned no choices".into()))
    }

    async fn complete_ollama(&self, system: &str, user: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&serde_json::json!({
                "model": self.model,
                "stream": false,
                "format": "json",
                "options": { "temperature": 0 },
                "messages": [
                    { "role": "system", "content": system },
                    { "role": "user", "content": user }
                ]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!("Ollama chat failed ({}): {}", status, error_text)));
        }

        let body: OllamaResponse = response.json().await?;
        Ok(body.message.content)
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        match self.provider {
            LlmProvider::OpenAi => self.complete_openai(system, user).await,
            LlmProvider::Ollama => self.complete_ollama(system, user).await,
            LlmProvider::Disabled => Err(AppError::Llm("language model is disabled".into())),
        }
    }
}

/// 根据配置创建客户端；`disabled` 返回 None
///
/// 需要密钥的后端缺少密钥时返回 `AppError::Config`。
pub fn create_llm_client(config: &LlmConfig) -> Result<Option<Arc<dyn LlmClient>>> {
    let provider = LlmProvider::parse(&config.provider)?;
    if provider == LlmProvider::Disabled {
        info!("Language model classifier disabled");
        return Ok(None);
    }

    let has_key = config.api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
    if provider.requires_api_key() && !has_key {
        return Err(AppError::Config(format!(
            "语言模型后端 {} 需要 api_key",
            config.provider
        )));
    }

    info!("Language model classifier: {} ({})", config.provider, config.model);
    Ok(Some(Arc::new(HttpLlmClient::new(config, provider)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_provider_has_no_client() {
        let client = create_llm_client(&LlmConfig::default()).unwrap();
        assert!(client.is_none());
    }

    #[test]
    fn test_openai_without_key_is_config_error() {
        let config = LlmConfig {
            provider: "openai".into(),
            api_key: Some("  ".into()),
            ..LlmConfig::default()
        };
        assert!(matches!(create_llm_client(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = LlmConfig {
            provider: "ollama".into(),
            ..LlmConfig::default()
        };
        assert!(create_llm_client(&config).unwrap().is_some());
    }

    #[test]
    fn test_unknown_provider() {
        assert!(matches!(LlmProvider::parse("gemini"), Err(AppError::Config(_))));
        assert_eq!(LlmProvider::parse("OpenAI").unwrap(), LlmProvider::OpenAi);
    }
}
