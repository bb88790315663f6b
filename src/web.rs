//! Browser form front-end.
//!
//! Renders a single page with a masked key field, a question box and a model
//! selector. The key is used for one request and never written back into
//! the page.

use anyhow::{Context, Result};
use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::credential::Credential;
use crate::gateway::CompletionGateway;
use crate::model::ModelChoice;
use crate::pipeline::{self, PreparedQuestion};
use crate::render::{answer_or_placeholder, raw_excerpt};

const KEY_WARNING: &str =
    "Please paste your OpenRouter API key above before asking a question. This key will not be saved.";
const MISSING_KEY_ERROR: &str =
    "No API key provided. Please paste your OpenRouter API key in the field above.";

pub struct AppState {
    pub gateway: Arc<dyn CompletionGateway>,
    pub cfg: Config,
}

type AppStateArc = Arc<AppState>;

#[derive(Deserialize)]
pub struct AskForm {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    model: String,
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Answered {
        normalized: String,
        raw_excerpt: String,
        answer: Option<String>,
    },
    Failed {
        normalized: String,
        message: String,
    },
}

#[derive(Debug)]
struct PageView<'a> {
    question: &'a str,
    model: ModelChoice,
    key_missing: bool,
    outcome: Option<Outcome>,
}

pub fn router(state: AppStateArc) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ask", post(ask))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds `bind` (or the configured address) and serves the form until the
/// process is stopped.
pub async fn serve(
    gateway: Arc<dyn CompletionGateway>,
    cfg: Config,
    bind: Option<String>,
) -> Result<()> {
    let addr = bind.unwrap_or_else(|| cfg.web_bind_addr.clone());
    let app = router(Arc::new(AppState { gateway, cfg }));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind web form to '{addr}'"))?;
    info!(addr = %addr, "serving question form on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Web form server stopped unexpectedly")
}

async fn index() -> Html<String> {
    Html(render_page(&PageView {
        question: "",
        model: ModelChoice::default(),
        key_missing: true,
        outcome: None,
    }))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn ask(State(state): State<AppStateArc>, Form(form): Form<AskForm>) -> Html<String> {
    let AskForm {
        api_key,
        question,
        model,
    } = form;
    let credential = Credential::new(&api_key);
    drop(api_key);

    let model = ModelChoice::parse(&model).unwrap_or_default();
    let key_missing = credential.is_empty();

    let outcome = if question.trim().is_empty() {
        None
    } else {
        let prepared = PreparedQuestion::new(&question);
        if key_missing {
            warn!("form submitted without an API key");
            Some(Outcome::Failed {
                normalized: prepared.normalized,
                message: MISSING_KEY_ERROR.to_string(),
            })
        } else {
            info!(model = %model.as_str(), "asking question from form");
            let result = pipeline::ask(
                state.gateway.as_ref(),
                &prepared,
                model.as_str(),
                state.cfg.form_max_tokens,
                &credential,
            )
            .await;
            Some(match result {
                Ok(result) => Outcome::Answered {
                    normalized: prepared.normalized,
                    raw_excerpt: raw_excerpt(&result.raw),
                    answer: result.answer,
                },
                Err(err) => Outcome::Failed {
                    normalized: prepared.normalized,
                    message: format!("Error querying OpenRouter: {err}"),
                },
            })
        }
    };

    Html(render_page(&PageView {
        question: &question,
        model,
        key_missing,
        outcome,
    }))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn render_page(view: &PageView<'_>) -> String {
    let mut page = String::from(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>LLM Q&amp;A (OpenRouter)</title>\n</head>\n<body>\n\
         <h1>LLM Q&amp;A &mdash; OpenRouter</h1>\n\
         <p>Enter a question and click 'Ask' to query the LLM.</p>\n\
         <form method=\"post\" action=\"/ask\">\n\
         <h2>Your OpenRouter API key</h2>\n\
         <label for=\"api_key\">Paste your OpenRouter API key (required)</label>\n\
         <input type=\"password\" id=\"api_key\" name=\"api_key\" value=\"\" autocomplete=\"off\">\n",
    );

    if view.key_missing {
        let _ = writeln!(page, "<p class=\"warning\" role=\"alert\">{KEY_WARNING}</p>");
    }

    let _ = writeln!(
        page,
        "<label for=\"question\">Your question</label>\n\
         <textarea id=\"question\" name=\"question\" rows=\"6\">{}</textarea>",
        escape_html(view.question)
    );

    page.push_str("<label for=\"model\">Model</label>\n<select id=\"model\" name=\"model\">\n");
    for choice in ModelChoice::ALL {
        let selected = if choice == view.model { " selected" } else { "" };
        let _ = writeln!(
            page,
            "<option value=\"{0}\"{selected}>{0}</option>",
            choice.as_str()
        );
    }
    page.push_str("</select>\n<button type=\"submit\">Ask</button>\n</form>\n");

    match &view.outcome {
        Some(Outcome::Answered {
            normalized,
            raw_excerpt,
            answer,
        }) => {
            push_processed(&mut page, normalized);
            let _ = writeln!(
                page,
                "<h2>Raw response (truncated)</h2>\n<pre><code>{}</code></pre>\n\
                 <h2>Answer</h2>\n<p class=\"answer\">{}</p>",
                escape_html(raw_excerpt),
                escape_html(answer_or_placeholder(answer.as_deref()))
            );
        }
        Some(Outcome::Failed {
            normalized,
            message,
        }) => {
            push_processed(&mut page, normalized);
            let _ = writeln!(
                page,
                "<p class=\"error\" role=\"alert\">{}</p>",
                escape_html(message)
            );
        }
        None => {}
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn push_processed(page: &mut String, normalized: &str) {
    let _ = writeln!(
        page,
        "<h2>Processed question</h2>\n<p class=\"processed\">{}</p>",
        escape_html(normalized)
    );
}
