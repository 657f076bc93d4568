use crate::schema::{ExtractionError, ExtractionResult};

/// Strip a surrounding ```/```json code fence from model output.
///
/// Best effort, not a markdown parser: remove an opening fence (and a
/// leading case-insensitive `json` token after it), remove a closing
/// fence, and otherwise return the trimmed text untouched. Nested or
/// malformed fences get no special handling.
pub fn clean_json_fences(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start();
        if text.get(..4).is_some_and(|token| token.eq_ignore_ascii_case("json")) {
            text = text[4..].trim_start();
        }
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text.to_string()
}

/// Fence-strip then strict-parse model output into an
/// `ExtractionResult`. Anything that fails to parse into one of the
/// two result shapes becomes the malformed-output error, carrying both
/// the raw text and the post-unwrap attempt for diagnosis. Never
/// panics.
pub fn parse_model_output(raw: &str) -> ExtractionResult {
    let cleaned = clean_json_fences(raw);

    match serde_json::from_str::<ExtractionResult>(&cleaned) {
        Ok(result) => result,
        Err(_) => ExtractionResult::Error(ExtractionError {
            error: "LLM returned invalid JSON.".to_string(),
            raw_output: Some(raw.trim().to_string()),
            cleaned_attempt: Some(cleaned),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        assert_eq!(clean_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_plain_fence() {
        assert_eq!(clean_json_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn fence_token_is_case_insensitive() {
        assert_eq!(clean_json_fences("```JSON\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn identity_without_fence() {
        assert_eq!(clean_json_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn opening_fence_without_closing_strips_only_opening() {
        assert_eq!(clean_json_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn parses_fenced_success_object() {
        let raw = "```json\n{\"name\": \"Maya\", \"storyTitle\": \"The Lost Garden\"}\n```";
        let result = parse_model_output(raw);
        assert!(!result.is_error());
    }

    #[test]
    fn passes_model_error_object_through() {
        let result = parse_model_output("{\"error\": \"Not a character in the story.\"}");

        assert_eq!(
            result,
            ExtractionResult::Error(ExtractionError::new("Not a character in the story."))
        );
    }

    #[test]
    fn malformed_output_carries_raw_and_cleaned() {
        let result = parse_model_output("```json\nSorry, I cannot help.\n```");

        match result {
            ExtractionResult::Error(err) => {
                assert_eq!(err.error, "LLM returned invalid JSON.");
                assert_eq!(
                    err.raw_output.as_deref(),
                    Some("```json\nSorry, I cannot help.\n```")
                );
                assert_eq!(err.cleaned_attempt.as_deref(), Some("Sorry, I cannot help."));
            }
            ExtractionResult::Character(_) => panic!("expected the error shape"),
        }
    }

    #[test]
    fn valid_json_with_wrong_shape_is_malformed() {
        let result = parse_model_output("[1, 2, 3]");

        match result {
            ExtractionResult::Error(err) => {
                assert_eq!(err.error, "LLM returned invalid JSON.");
                assert_eq!(err.cleaned_attempt.as_deref(), Some("[1, 2, 3]"));
            }
            ExtractionResult::Character(_) => panic!("expected the error shape"),
        }
    }
}
