use anyhow::Result;
use std::path::Path;
use tracing::info;

use extract::MistralChat;
use index::{IndexOutcome, Indexer, MistralEmbeddings, VectorStore};
use ingest::{SplitterConfig, TextSplitter, load_story_documents};
use query::{CharacterQueryEngine, Retriever};

use crate::config::MistralConfig;

/// Load, chunk, embed, and persist a story corpus.
pub async fn compute_embeddings(data_dir: &Path, persist_dir: &Path) -> Result<()> {
    let config = MistralConfig::from_env()?;

    println!("Loading stories from: {}", data_dir.display());
    let documents = load_story_documents(data_dir).await?;
    println!("Loaded {} story files.", documents.len());

    let splitter = TextSplitter::new(SplitterConfig::default())?;
    let chunks = splitter.split_documents(&documents);
    println!("Produced {} chunks.", chunks.len());

    let embedder = MistralEmbeddings::with_api_key(config.api_key);
    let indexer = Indexer::new(Box::new(embedder));

    match indexer.index_chunks(chunks, persist_dir).await? {
        IndexOutcome::EmptyCorpus => {
            println!("No valid chunks to embed - nothing was indexed.");
        }
        IndexOutcome::Indexed(count) => {
            println!(
                "Embedded and stored {count} chunks at: {}",
                persist_dir.display()
            );
        }
    }

    Ok(())
}

/// Query the index for a character and print the structured result as
/// pretty JSON (success and error objects share the same channel).
pub async fn get_character_info(name: &str, persist_dir: &Path) -> Result<()> {
    let config = MistralConfig::from_env()?;

    info!(name, persist_dir = %persist_dir.display(), "Running character query");
    println!("Searching for character: {name}");

    let store = VectorStore::open(persist_dir)?;
    let embedder = MistralEmbeddings::with_api_key(config.api_key.clone());
    let chat = MistralChat::with_api_key(config.api_key);

    let engine = CharacterQueryEngine::new(Retriever::new(Box::new(embedder), store), Box::new(chat));
    let result = engine.get_character_info(name).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
