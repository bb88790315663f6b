use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::Term;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::info;

use crate::config::Config;
use crate::credential::Credential;
use crate::gateway::CompletionGateway;
use crate::pipeline::{self, PreparedQuestion};
use crate::render::{answer_or_placeholder, raw_excerpt};

#[derive(Parser)]
#[command(name = "llmqa", version, about = "Ask a question to an OpenRouter-compatible model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub ask: AskArgs,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the question form over HTTP
    Serve {
        /// Address to bind, overrides WEB_BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Args, Default)]
pub struct AskArgs {
    /// Question to ask
    #[arg(short, long)]
    pub question: Option<String>,

    /// OpenRouter API key
    #[arg(short = 'k', long = "api-key")]
    pub api_key: Option<String>,

    /// Model identifier, overrides MODEL
    #[arg(short, long)]
    pub model: Option<String>,

    /// Token cap for the answer, 0 disables it; overrides CLI_MAX_TOKENS
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

/// Source of interactively entered values.
pub trait Prompter {
    fn read_question(&mut self) -> Result<String>;
    fn read_api_key(&mut self) -> Result<Credential>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_stdin_line() -> Result<String> {
        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .context("Failed to read stdin")?;
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn read_question(&mut self) -> Result<String> {
        print!("Enter your question: ");
        io::stdout().flush().context("Failed to flush stdout")?;
        Self::read_stdin_line()
    }

    fn read_api_key(&mut self) -> Result<Credential> {
        let term = Term::stderr();
        if io::stdin().is_terminal() && term.is_term() {
            term.write_str("OpenRouter API key: ")
                .context("Failed to write key prompt")?;
            let key = term
                .read_secure_line()
                .context("Failed to read API key")?;
            return Ok(Credential::new(&key));
        }

        eprint!("OpenRouter API key: ");
        let key = Self::read_stdin_line()?;
        Ok(Credential::new(&key))
    }
}

/// One question/answer round trip on the terminal.
///
/// Every handled outcome, including request failures, is printed to `out`
/// and returns `Ok`.
pub async fn run_cli<G, P, W>(
    gateway: &G,
    cfg: &Config,
    args: AskArgs,
    prompter: &mut P,
    out: &mut W,
) -> Result<()>
where
    G: CompletionGateway + ?Sized,
    P: Prompter,
    W: Write,
{
    let AskArgs {
        question,
        api_key,
        model,
        max_tokens,
    } = args;

    let question = match question {
        Some(question) => question,
        None => prompter.read_question()?,
    };

    let credential = match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => Credential::new(&key),
        None => prompter.read_api_key()?,
    };
    if credential.is_empty() {
        writeln!(out, "No API key provided. Exiting.")?;
        return Ok(());
    }

    let model = model.unwrap_or_else(|| cfg.model.clone());
    let max_tokens = match max_tokens {
        Some(0) => None,
        Some(limit) => Some(limit),
        None => cfg.cli_max_tokens,
    };

    let prepared = PreparedQuestion::new(&question);
    writeln!(out, "\nProcessed question: {}", prepared.normalized)?;
    writeln!(out, "\nSending to LLM...\n")?;
    out.flush().context("Failed to flush output")?;

    info!(model = %model, max_tokens = ?max_tokens, "asking question from cli");
    match pipeline::ask(gateway, &prepared, &model, max_tokens, &credential).await {
        Ok(result) => {
            writeln!(out, "Raw response (truncated):")?;
            writeln!(out, "{}", raw_excerpt(&result.raw))?;
            writeln!(
                out,
                "\nAnswer:\n{}",
                answer_or_placeholder(result.answer.as_deref())
            )?;
        }
        Err(err) => {
            writeln!(out, "Error querying OpenRouter: {err}")?;
        }
    }

    Ok(())
}
