use regex::Regex;
use std::sync::LazyLock;

// Word chars are letters (L*), numbers (N*) and `_`; combining marks are not.
// The information separators U+001C..U+001F count as whitespace.
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s\x1C-\x1F]").expect("static regex compile"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+").expect("static regex compile"));

/// Lowercases `text`, drops everything except word characters and
/// whitespace, and collapses whitespace runs into single spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "What is NLP?!",
        "  Hello,\tWORLD!!  \n\n How are   you? ",
        "snake_case stays; kebab-case doesn't",
        "Ünïcödé — ÇAFÉ, naïve résumé…",
        "İstanbul ΣΊΣΥΦΟΣ",
        "数字 123 和 ４５６",
        "line one\r\nline two\u{00a0}\u{2003}end",
        "emoji 🙂 and symbols $%^&*()",
        "مَرحبا بالعالم",
        "हिन्दी भाषा",
        "a\u{1c}b\u{1d}c\u{1e}d\u{1f}e",
    ];

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(normalize("What is NLP?!"), "what is nlp");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn collapses_whitespace_including_newlines() {
        assert_eq!(
            normalize("  Hello,\tWORLD!!  \n\n How are   you? "),
            "hello world how are you"
        );
    }

    #[test]
    fn keeps_underscores_digits_and_unicode_letters() {
        assert_eq!(normalize("Rust_2024 rocks"), "rust_2024 rocks");
        assert_eq!(normalize("Ünïcödé ÇAFÉ"), "ünïcödé café");
        assert_eq!(normalize("数字 123"), "数字 123");
    }

    #[test]
    fn removed_punctuation_does_not_leave_gaps() {
        assert_eq!(normalize("kebab-case"), "kebabcase");
        assert_eq!(normalize("a - b"), "a b");
    }

    #[test]
    fn drops_combining_marks() {
        assert_eq!(normalize("مَرحبا"), "مرحبا");
        assert_eq!(normalize("हिन्दी"), "हनद");
        assert_eq!(normalize("e\u{301}te\u{301}"), "ete");
    }

    #[test]
    fn information_separators_count_as_whitespace() {
        assert_eq!(normalize("a\u{1c}b"), "a b");
        assert_eq!(normalize("a\u{1d}\u{1e}b\u{1f}c"), "a b c");
        assert_eq!(normalize("\u{1d}x\u{1e}"), "x");
    }

    #[test]
    fn is_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn output_contains_only_word_chars_and_single_spaces() {
        for sample in SAMPLES {
            let out = normalize(sample);
            assert_eq!(out, out.trim(), "input: {sample:?}");
            assert!(!out.contains("  "), "double space for {sample:?}: {out:?}");
            for ch in out.chars() {
                assert!(
                    ch == ' ' || ch == '_' || ch.is_alphanumeric(),
                    "unexpected {ch:?} in {out:?}"
                );
                assert!(
                    !ch.is_uppercase(),
                    "uppercase {ch:?} survived in {out:?}"
                );
            }
        }
    }
}
