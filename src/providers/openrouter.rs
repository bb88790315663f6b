use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::credential::Credential;
use crate::error::CompletionError;
use crate::model::{CompletionRequest, CompletionResult};
use crate::providers::http_errors::model_api_request_error;

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn to_body(request: &CompletionRequest) -> ChatCompletionBody<'_> {
    ChatCompletionBody {
        model: &request.model,
        messages: [ChatMessage {
            role: "user",
            content: &request.prompt,
        }],
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

/// Sends one chat-completion request and decodes the reply.
///
/// An empty credential fails before anything touches the network. The call
/// is never retried.
pub async fn complete(
    client: &Client,
    cfg: &Config,
    request: &CompletionRequest,
    credential: &Credential,
) -> Result<CompletionResult, CompletionError> {
    if credential.is_empty() {
        warn!(model = %request.model, "refusing to call model API without a credential");
        return Err(CompletionError::MissingCredential);
    }

    let api_url = completions_url(&cfg.model_base_url);
    debug!(
        api_url = %api_url,
        model = %request.model,
        prompt_len = request.prompt.len(),
        max_tokens = ?request.max_tokens,
        "sending chat completion request"
    );

    let response = client
        .post(&api_url)
        .bearer_auth(credential.bearer_token())
        .timeout(Duration::from_secs(cfg.model_timeout_secs))
        .json(&to_body(request))
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %request.model,
                error = %err,
                "chat completion request failed"
            );
            model_api_request_error(err, &api_url, cfg.model_timeout_secs)
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());
        warn!(
            api_url = %api_url,
            model = %request.model,
            status = %status,
            response_body_len = body.len(),
            "model API returned non-success status"
        );
        return Err(CompletionError::Upstream { status, body });
    }

    let raw: Value = response.json().await.map_err(|err| {
        if err.is_timeout() {
            model_api_request_error(err, &api_url, cfg.model_timeout_secs)
        } else {
            CompletionError::InvalidResponse(err.to_string())
        }
    })?;
    let result = CompletionResult::from_raw(raw);
    debug!(
        model = %request.model,
        answer_len = result.answer.as_ref().map(String::len),
        "received chat completion response"
    );
    Ok(result)
}
