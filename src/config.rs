use std::env;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MODEL_BASE_URL: &str = "https://api.openrouter.ai/v1";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CLI_MAX_TOKENS: Option<u32> = Some(800);
const DEFAULT_FORM_MAX_TOKENS: Option<u32> = None;
const DEFAULT_WEB_BIND_ADDR: &str = "127.0.0.1:8501";

/// Runtime settings shared by both front-ends.
///
/// Never holds the API key; that is passed per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model: String,
    pub model_base_url: String,
    pub model_timeout_secs: u64,
    pub cli_max_tokens: Option<u32>,
    pub form_max_tokens: Option<u32>,
    pub web_bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env_with(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            model: parse_non_empty(get_var("MODEL").as_deref(), DEFAULT_MODEL),
            model_base_url: parse_non_empty(
                get_var("MODEL_BASE_URL").as_deref(),
                DEFAULT_MODEL_BASE_URL,
            ),
            model_timeout_secs: parse_model_timeout_secs(
                get_var("MODEL_TIMEOUT_SECS").as_deref(),
            ),
            cli_max_tokens: parse_max_tokens(
                get_var("CLI_MAX_TOKENS").as_deref(),
                DEFAULT_CLI_MAX_TOKENS,
            ),
            form_max_tokens: parse_max_tokens(
                get_var("FORM_MAX_TOKENS").as_deref(),
                DEFAULT_FORM_MAX_TOKENS,
            ),
            web_bind_addr: parse_non_empty(
                get_var("WEB_BIND_ADDR").as_deref(),
                DEFAULT_WEB_BIND_ADDR,
            ),
        }
    }
}

fn parse_non_empty(raw: Option<&str>, default: &str) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn parse_positive_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn parse_model_timeout_secs(raw: Option<&str>) -> u64 {
    parse_positive_u64(raw, DEFAULT_MODEL_TIMEOUT_SECS)
}

/// `none`, `off` and any zero value disable the cap; garbage keeps the default.
pub(crate) fn parse_max_tokens(raw: Option<&str>, default: Option<u32>) -> Option<u32> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return default;
    };

    match value.to_ascii_lowercase().as_str() {
        "none" | "off" => None,
        other => match other.parse::<u32>() {
            Ok(0) => None,
            Ok(limit) => Some(limit),
            Err(_) => default,
        },
    }
}
