pub mod llm;
pub mod normalizer;
pub mod prompt;
pub mod schema;

pub use llm::{ChatModel, MistralChat};
pub use normalizer::{clean_json_fences, parse_model_output};
pub use prompt::{PromptMode, build_extraction_prompt};
pub use schema::{
    CharacterInfo, CharacterRelation, CharacterType, ExtractionError, ExtractionResult,
};
