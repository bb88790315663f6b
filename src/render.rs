use serde_json::Value;

pub const RAW_RESPONSE_LIMIT: usize = 2000;
pub const NO_ANSWER: &str = "(no answer parsed)";

/// Keeps at most `limit` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Pretty-printed response body, cut to [`RAW_RESPONSE_LIMIT`] characters.
pub fn raw_excerpt(raw: &Value) -> String {
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    truncate_chars(&pretty, RAW_RESPONSE_LIMIT).to_string()
}

pub fn answer_or_placeholder(answer: Option<&str>) -> &str {
    answer.unwrap_or(NO_ANSWER)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{NO_ANSWER, RAW_RESPONSE_LIMIT, answer_or_placeholder, raw_excerpt, truncate_chars};

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn raw_excerpt_is_pretty_and_bounded() {
        let small = raw_excerpt(&json!({"choices": []}));
        assert_eq!(small, "{\n  \"choices\": []\n}");

        let big = json!({"text": "x".repeat(5000)});
        assert_eq!(raw_excerpt(&big).chars().count(), RAW_RESPONSE_LIMIT);
    }

    #[test]
    fn raw_excerpt_keeps_server_key_order() {
        let raw: serde_json::Value =
            serde_json::from_str(r#"{"id":"x","object":"chat.completion","choices":[]}"#)
                .expect("valid json");
        let excerpt = raw_excerpt(&raw);

        let id = excerpt.find("\"id\"").expect("id key");
        let object = excerpt.find("\"object\"").expect("object key");
        let choices = excerpt.find("\"choices\"").expect("choices key");
        assert!(id < object && object < choices, "keys reordered: {excerpt}");
    }

    #[test]
    fn missing_answer_uses_placeholder() {
        assert_eq!(answer_or_placeholder(None), NO_ANSWER);
        assert_eq!(answer_or_placeholder(Some("Paris")), "Paris");
    }
}
