use crate::credential::Credential;
use crate::error::CompletionError;
use crate::gateway::CompletionGateway;
use crate::model::{CompletionRequest, CompletionResult};
use crate::normalize::normalize;
use crate::prompt::build_prompt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuestion {
    pub normalized: String,
    pub prompt: String,
}

impl PreparedQuestion {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let prompt = build_prompt(&normalized);
        Self { normalized, prompt }
    }
}

/// Runs a prepared question through `gateway` once.
pub async fn ask<G>(
    gateway: &G,
    question: &PreparedQuestion,
    model: &str,
    max_tokens: Option<u32>,
    credential: &Credential,
) -> Result<CompletionResult, CompletionError>
where
    G: CompletionGateway + ?Sized,
{
    let request = CompletionRequest::new(model, question.prompt.clone()).with_max_tokens(max_tokens);
    gateway.complete(&request, credential).await
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::stub::{StubGateway, StubOutcome};
    use super::{PreparedQuestion, ask};
    use crate::credential::Credential;
    use crate::prompt::build_prompt;

    #[test]
    fn prepared_question_normalizes_then_builds_prompt() {
        let question = PreparedQuestion::new("What is NLP?!");
        assert_eq!(question.normalized, "what is nlp");
        assert_eq!(question.prompt, build_prompt("what is nlp"));
    }

    #[tokio::test]
    async fn ask_forwards_model_prompt_and_token_cap() {
        let gateway = StubGateway::new(StubOutcome::Raw(
            json!({"choices": [{"message": {"content": "Paris"}}]}),
        ));
        let question = PreparedQuestion::new("Capital of France?");

        let result = ask(&gateway, &question, "gpt-4o", Some(800), &Credential::new("sk"))
            .await
            .expect("stub should answer");
        assert_eq!(result.answer.as_deref(), Some("Paris"));

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-4o");
        assert_eq!(calls[0].prompt, question.prompt);
        assert_eq!(calls[0].max_tokens, Some(800));
    }
}
