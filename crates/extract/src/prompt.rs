/// Which extraction prompt to build. `Strict` additionally states the
/// story title and gates on the named entity being a human character,
/// which cuts false positives for places, objects, and animals that
/// similarity search matched anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Basic,
    Strict,
}

pub fn build_extraction_prompt(
    character_name: &str,
    story_title: &str,
    story_context: &str,
    mode: PromptMode,
) -> String {
    let gate = match mode {
        PromptMode::Basic => String::new(),
        PromptMode::Strict => format!(
            r#"The story is titled "{story_title}".

First decide whether "{character_name}" is a HUMAN CHARACTER in this story.
If it is not a human character (for example a place, an object, or an animal),
return ONLY this JSON and nothing else:

{{"error": "Not a character in the story."}}

Only if it is a human character, continue below.

"#
        ),
    };

    format!(
        r#"You are an information extraction assistant.

Extract information for the character "{character_name}" from the provided story context.

{gate}Return STRICT JSON with the following keys:

- name
- storyTitle
- summary
- relations: an array of objects -> {{ "name": string, "relation": string }}
- characterType: protagonist, antagonist, side character, unknown

If information is missing, return empty strings or an empty list.

OUTPUT ONLY JSON. No explanation.

Story context:
"""
{story_context}
"""
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_prompt_has_schema_and_context() {
        let prompt =
            build_extraction_prompt("Maya", "The Lost Garden", "Maya went north.", PromptMode::Basic);

        assert!(prompt.contains("\"Maya\""));
        assert!(prompt.contains("Maya went north."));
        assert!(prompt.contains("characterType"));
        assert!(prompt.contains("OUTPUT ONLY JSON"));
        assert!(!prompt.contains("The Lost Garden"));
        assert!(!prompt.contains("HUMAN CHARACTER"));
    }

    #[test]
    fn strict_prompt_states_title_and_gate() {
        let prompt =
            build_extraction_prompt("Maya", "The Lost Garden", "Maya went north.", PromptMode::Strict);

        assert!(prompt.contains(r#"The story is titled "The Lost Garden"."#));
        assert!(prompt.contains("HUMAN CHARACTER"));
        assert!(prompt.contains(r#"{"error": "Not a character in the story."}"#));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_extraction_prompt("Maya", "T", "ctx", PromptMode::Strict);
        let b = build_extraction_prompt("Maya", "T", "ctx", PromptMode::Strict);
        assert_eq!(a, b);
    }
}
