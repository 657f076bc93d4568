pub mod denylist;
pub mod orchestrator;
pub mod retriever;

pub use denylist::is_denylisted;
pub use orchestrator::{CharacterQueryEngine, MAX_OUTPUT_TOKENS, TOP_K};
pub use retriever::Retriever;
