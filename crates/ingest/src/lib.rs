pub mod document;
pub mod reader;
pub mod splitter;

pub use document::{Chunk, Document, DocumentMetadata};
pub use reader::{guess_story_title, load_story_documents};
pub use splitter::{SplitterConfig, TextSplitter};

use anyhow::Result;
use std::path::Path;

/// Load a story directory and split every document into chunks.
pub async fn load_and_chunk(data_dir: &Path, config: SplitterConfig) -> Result<Vec<Chunk>> {
    let documents = load_story_documents(data_dir).await?;
    let splitter = TextSplitter::new(config)?;
    Ok(splitter.split_documents(&documents))
}
