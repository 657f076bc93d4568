pub mod embeddings;
pub mod store;

pub use embeddings::{Embedder, MistralEmbeddings};
pub use store::{IndexEntry, ScoredChunk, VectorStore};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use ingest::Chunk;

/// What an indexing run did.
#[derive(Debug, PartialEq)]
pub enum IndexOutcome {
    /// No valid chunks: nothing embedded, no store touched.
    EmptyCorpus,
    /// Number of chunks embedded and persisted.
    Indexed(usize),
}

/// Embeds chunks and persists them into a vector store location.
pub struct Indexer {
    embedder: Box<dyn Embedder>,
}

impl Indexer {
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Filter out empty chunks, embed the rest in one batch, and
    /// persist them at `persist_dir`. An empty corpus is an observable
    /// no-op, not an error. Re-running against the same location
    /// accumulates entries (no deduplication).
    pub async fn index_chunks(&self, chunks: Vec<Chunk>, persist_dir: &Path) -> Result<IndexOutcome> {
        let valid: Vec<Chunk> = chunks
            .into_iter()
            .filter(|chunk| !chunk.content.trim().is_empty())
            .collect();

        if valid.is_empty() {
            info!("No valid chunks to index");
            return Ok(IndexOutcome::EmptyCorpus);
        }

        let texts: Vec<String> = valid.iter().map(|chunk| chunk.content.clone()).collect();
        let embeddings = self
            .embedder
            .embed(&texts)
            .await
            .context("Failed to embed chunks")?;
        anyhow::ensure!(
            embeddings.len() == valid.len(),
            "Embedding provider returned {} vectors for {} chunks",
            embeddings.len(),
            valid.len(),
        );

        let entries: Vec<IndexEntry> = valid
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();
        let indexed = entries.len();

        let mut store = VectorStore::open(persist_dir)?;
        store.upsert(entries);
        store.persist()?;

        info!(chunks = indexed, persist_dir = %persist_dir.display(), "Index persisted");
        Ok(IndexOutcome::Indexed(indexed))
    }
}
