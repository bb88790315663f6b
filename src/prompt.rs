pub const SYSTEM_PREAMBLE: &str =
    "You are a helpful assistant. Answer the user's question concisely and clearly.";

/// Wraps an already-normalized question in the fixed instruction template.
/// The question is inserted as-is.
pub fn build_prompt(normalized: &str) -> String {
    format!("{SYSTEM_PREAMBLE}\nQuestion: {normalized}\nAnswer:")
}

#[cfg(test)]
mod tests {
    use super::build_prompt;
    use crate::normalize::normalize;

    #[test]
    fn build_prompt_matches_template_exactly() {
        assert_eq!(
            build_prompt("what is nlp"),
            "You are a helpful assistant. Answer the user's question concisely and clearly.\n\
             Question: what is nlp\n\
             Answer:"
        );
    }

    #[test]
    fn build_prompt_does_not_escape_input() {
        let prompt = build_prompt("a \"quoted\" {brace}");
        assert!(prompt.contains("Question: a \"quoted\" {brace}\n"));
    }

    #[test]
    fn build_prompt_handles_empty_question() {
        assert!(build_prompt("").ends_with("Question: \nAnswer:"));
    }

    #[test]
    fn normalized_prompt_always_ends_with_answer_marker() {
        for raw in ["", "What is NLP?!", "Answer: no\n", "trailing newline\n\n"] {
            let prompt = build_prompt(&normalize(raw));
            assert!(prompt.ends_with("Answer:"), "prompt: {prompt:?}");
        }
    }
}
