use anyhow::{Context, Result};

use index::{Embedder, ScoredChunk, VectorStore};

/// Similarity retrieval over an opened store, using the same embedding
/// model that built the index.
pub struct Retriever {
    embedder: Box<dyn Embedder>,
    store: VectorStore,
}

impl Retriever {
    pub fn new(embedder: Box<dyn Embedder>, store: VectorStore) -> Self {
        Self { embedder, store }
    }

    /// Top-k chunks for the query, highest similarity first. An empty
    /// store or no hits is an empty result, not an error.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let vectors = self
            .embedder
            .embed(&[query.to_string()])
            .await
            .context("Failed to embed query")?;
        let query_vector = vectors
            .into_iter()
            .next()
            .context("Embedding provider returned no vector for the query")?;

        Ok(self.store.similarity_search(&query_vector, k))
    }
}
