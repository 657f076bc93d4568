use anyhow::{Context, Result};
use tracing::info;

use extract::{ChatModel, ExtractionResult, PromptMode, build_extraction_prompt, parse_model_output};

use crate::denylist::is_denylisted;
use crate::retriever::Retriever;

/// Chunks retrieved per query.
pub const TOP_K: usize = 4;
/// Output-length bound passed to the chat provider.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// Runs a single character query: fast reject, retrieve, context
/// membership check, strict extraction, normalize.
///
/// Terminal states are data: the success shape or one of three error
/// shapes (denylisted term, not found, invalid model output). Provider
/// failures propagate as `Err` instead of being folded into those.
pub struct CharacterQueryEngine {
    retriever: Retriever,
    chat: Box<dyn ChatModel>,
}

impl CharacterQueryEngine {
    pub fn new(retriever: Retriever, chat: Box<dyn ChatModel>) -> Self {
        Self { retriever, chat }
    }

    pub async fn get_character_info(&self, character_name: &str) -> Result<ExtractionResult> {
        if is_denylisted(character_name) {
            info!(name = character_name, "Query rejected by denylist");
            return Ok(ExtractionResult::error(format!(
                "'{character_name}' is not a character in the story."
            )));
        }

        let results = self.retriever.search(character_name, TOP_K).await?;
        info!(name = character_name, retrieved = results.len(), "Retrieval complete");
        if results.is_empty() {
            return Ok(not_found(character_name));
        }

        let story_context: String = results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        // Cheap precision filter before spending a model call. Known
        // gap: characters referred to only by nickname will miss.
        if !story_context
            .to_lowercase()
            .contains(&character_name.to_lowercase())
        {
            info!(name = character_name, "Name absent from retrieved context");
            return Ok(not_found(character_name));
        }

        // The best-matching chunk decides which story we are in.
        let story_title = results[0].chunk.metadata.story_title.clone();

        let prompt =
            build_extraction_prompt(character_name, &story_title, &story_context, PromptMode::Strict);
        let raw = self
            .chat
            .complete(&prompt, MAX_OUTPUT_TOKENS)
            .await
            .context("Chat completion failed")?;

        Ok(parse_model_output(&raw))
    }
}

fn not_found(character_name: &str) -> ExtractionResult {
    ExtractionResult::error(format!(
        "Character '{character_name}' not found in any story."
    ))
}
