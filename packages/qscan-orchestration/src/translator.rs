//! Code translation through a hosted text-completion service
//!
//! Non-JavaScript submissions are rewritten into JavaScript by a chat
//! completion call before analysis. The service is told to answer with a
//! fixed sentinel when the input is not code at all; that answer becomes
//! `TranslationError::NotCode` (a client error) instead of a service error.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use qscan_ir::LanguageId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::TranslatorConfig;
use crate::error::ErrorCategory;

/// Exact completion text meaning "this is not code"
pub const NOT_CODE_SENTINEL: &str = "Error: Not code.";

const SYSTEM_PROMPT: &str = "You are JSConverterGPT, a helpful assistant that converts any given code into Javascript, perfectly capturing its functionality and essence. You only output the converted code, nothing else.";

const INSTRUCTIONS: &str = "If by mistake the code is actually Javascript already, do not make any changes, just output the code as is. If what is given is not code or cannot be reasonably converted (e.g., just plain text), output an error message starting EXACTLY with \"Error: Not code.\", nothing else. If given pseudocode, convert it into Javascript code that best reflects its essence. ONLY output the JavaScript code block (within ```js ... ```) or the specific error message \"Error: Not code.\".";

// One fence around the whole completion, optionally tagged js/javascript
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?:javascript|js)?\r?\n?([\s\S]*?)\r?\n?```$").unwrap());

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("input is not recognizable as code")]
    NotCode,

    #[error("API key is not configured (expected in ${env_var})")]
    MissingCredentials { env_var: String },

    #[error("request to translation service failed: {0}")]
    Request(String),

    #[error("translation service returned HTTP {status}")]
    Status { status: u16 },

    #[error("translation service returned an empty response")]
    EmptyCompletion,

    #[error("translation timed out after {0:?}")]
    Timeout(Duration),
}

impl TranslationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotCode => ErrorCategory::Permanent,
            Self::MissingCredentials { .. } => ErrorCategory::Infrastructure,
            Self::Status { status } if *status < 500 && *status != 429 => {
                ErrorCategory::Infrastructure
            }
            _ => ErrorCategory::Transient,
        }
    }

    /// Caller-facing description without configuration internals
    pub fn public_details(&self) -> String {
        match self {
            Self::MissingCredentials { .. } => "Translation service is not configured".to_string(),
            other => format!("Failed to convert code via the translation service: {}", other),
        }
    }
}

/// Rewrites source code in another language into JavaScript
#[async_trait]
pub trait CodeTranslator: Send + Sync {
    async fn translate(
        &self,
        code: &str,
        source_language: &LanguageId,
    ) -> Result<String, TranslationError>;
}

/// Chat-completion request/response shapes (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// User prompt embedding the snippet and its detected language
pub fn build_user_prompt(code: &str, language: &LanguageId) -> String {
    let (description, fence_tag) = if language.is_unknown() {
        ("potentially non-JavaScript or pseudocode", "text")
    } else {
        (language.as_str(), language.as_str())
    };

    format!(
        "Convert this {} code into Javascript:\n\n```{}\n{}\n```\n\n{}",
        description, fence_tag, code, INSTRUCTIONS
    )
}

/// Turn raw completion text into JavaScript, or a typed failure
pub fn interpret_completion(raw: Option<&str>) -> Result<String, TranslationError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(TranslationError::EmptyCompletion);
    }
    if text == NOT_CODE_SENTINEL {
        return Err(TranslationError::NotCode);
    }

    let stripped = CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str());
    Ok(stripped.to_string())
}

/// Translator backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl OpenAiTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("qscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    // Read at call time so a key added after start-up is picked up
    fn api_key(&self) -> Result<String, TranslationError> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TranslationError::MissingCredentials {
                env_var: self.config.api_key_env.clone(),
            })
    }
}

#[async_trait]
impl CodeTranslator for OpenAiTranslator {
    async fn translate(
        &self,
        code: &str,
        source_language: &LanguageId,
    ) -> Result<String, TranslationError> {
        let api_key = self.api_key().map_err(|e| {
            tracing::error!(env_var = %self.config.api_key_env, "translation API key is missing");
            e
        })?;

        let user_prompt = build_user_prompt(code, source_language);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::info!(language = %source_language, "converting code to JavaScript");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!(status, "translation service rejected the request");
            return Err(TranslationError::Status { status });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Request(format!("malformed response: {}", e)))?;

        let content = body
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|reply| reply.content.as_deref());

        let result = interpret_completion(content);
        match &result {
            Ok(js) => tracing::info!(bytes = js.len(), "code conversion successful"),
            Err(TranslationError::NotCode) => {
                tracing::warn!("translation service judged the input not to be code")
            }
            Err(e) => tracing::error!(error = %e, "code conversion failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_language() {
        let prompt = build_user_prompt("def f(): pass", &LanguageId::new("python"));
        assert!(prompt.starts_with("Convert this python code into Javascript:\n\n```python\ndef f(): pass\n```"));
        assert!(prompt.contains("\"Error: Not code.\""));
    }

    #[test]
    fn test_prompt_for_unknown_language() {
        let prompt = build_user_prompt("add the numbers", &LanguageId::unknown());
        assert!(prompt.starts_with(
            "Convert this potentially non-JavaScript or pseudocode code into Javascript:\n\n```text\n"
        ));
    }

    #[test]
    fn test_sentinel_is_not_code() {
        assert!(matches!(
            interpret_completion(Some("  Error: Not code.\n")),
            Err(TranslationError::NotCode)
        ));
        // only the exact sentinel counts
        assert!(interpret_completion(Some("Error: Not code. Sorry")).is_ok());
    }

    #[test]
    fn test_empty_completion() {
        assert!(matches!(interpret_completion(None), Err(TranslationError::EmptyCompletion)));
        assert!(matches!(interpret_completion(Some("   ")), Err(TranslationError::EmptyCompletion)));
    }

    #[test]
    fn test_fence_stripping() {
        let cases = [
            ("```js\nconst a = 1;\n```", "const a = 1;"),
            ("```javascript\r\nlet b = 2;\r\n```", "let b = 2;"),
            ("```\nvar c;\n```", "var c;"),
            ("const d = 4;", "const d = 4;"),
        ];
        for (raw, expected) in cases {
            assert_eq!(interpret_completion(Some(raw)).unwrap(), expected);
        }
    }

    #[test]
    fn test_other_fence_tag_stays_in_text() {
        let raw = "```python\nx = 1\n```";
        assert_eq!(interpret_completion(Some(raw)).unwrap(), "python\nx = 1");
    }

    #[test]
    fn test_missing_credentials() {
        let config = TranslatorConfig {
            api_key_env: "QSCAN_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..TranslatorConfig::default()
        };
        let translator = OpenAiTranslator::new(config).unwrap();
        assert!(matches!(
            translator.api_key(),
            Err(TranslationError::MissingCredentials { .. })
        ));
    }

    #[test]
    fn test_status_categories() {
        assert_eq!(TranslationError::Status { status: 503 }.category(), ErrorCategory::Transient);
        assert_eq!(TranslationError::Status { status: 429 }.category(), ErrorCategory::Transient);
        assert_eq!(TranslationError::Status { status: 401 }.category(), ErrorCategory::Infrastructure);
    }
}
