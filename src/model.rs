use serde_json::Value;

use crate::config::DEFAULT_MODEL;

pub const TEMPERATURE: f32 = 0.2;

/// Models offered by the web form selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelChoice {
    #[default]
    Gpt4oMini,
    Gpt4o,
    OpenrouterGpt,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 3] = [Self::Gpt4oMini, Self::Gpt4o, Self::OpenrouterGpt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4oMini => DEFAULT_MODEL,
            Self::Gpt4o => "gpt-4o",
            Self::OpenrouterGpt => "openrouter-gpt",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|choice| choice.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: TEMPERATURE,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Decoded endpoint body plus whatever answer could be pulled out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub raw: Value,
    pub answer: Option<String>,
}

impl CompletionResult {
    pub fn from_raw(raw: Value) -> Self {
        let answer = extract_answer(&raw);
        Self { raw, answer }
    }
}

/// First choice's `message.content`, falling back to its `text`.
///
/// Providers disagree on the response shape, so the document is walked
/// loosely: wrong types and empty strings count as missing.
pub fn extract_answer(raw: &Value) -> Option<String> {
    let first = raw.get("choices")?.as_array()?.first()?;
    let content = first
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty());
    let text = first
        .get("text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty());

    content.or(text).map(str::to_string)
}
