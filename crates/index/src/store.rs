use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ingest::Chunk;

const INDEX_FILE: &str = "index.json";

/// A chunk plus its embedding, as persisted by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A retrieval hit: the chunk with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Disk-persisted brute-force cosine similarity store.
///
/// Entries live in `index.json` under the persist directory. Upserts
/// append without deduplication, so re-indexing the same corpus
/// accumulates duplicate entries. The persist directory is a
/// single-writer resource; concurrent indexing runs against it are
/// not supported.
pub struct VectorStore {
    persist_dir: PathBuf,
    entries: Vec<IndexEntry>,
}

impl VectorStore {
    /// Open the store at `persist_dir`, loading any persisted index.
    /// A missing directory or index file is an empty store.
    pub fn open(persist_dir: &Path) -> Result<Self> {
        let index_path = persist_dir.join(INDEX_FILE);

        let entries = if index_path.is_file() {
            let raw = std::fs::read_to_string(&index_path)
                .with_context(|| format!("Failed to read index file: {index_path:?}"))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse index file: {index_path:?}"))?
        } else {
            Vec::new()
        };

        Ok(Self {
            persist_dir: persist_dir.to_path_buf(),
            entries,
        })
    }

    pub fn upsert(&mut self, entries: Vec<IndexEntry>) {
        self.entries.extend(entries);
    }

    /// Write the index to disk so it survives process restarts.
    pub fn persist(&self) -> Result<()> {
        std::fs::create_dir_all(&self.persist_dir)
            .with_context(|| format!("Failed to create persist dir: {:?}", self.persist_dir))?;

        let index_path = self.persist_dir.join(INDEX_FILE);
        let raw = serde_json::to_string(&self.entries).context("Failed to serialize index")?;
        std::fs::write(&index_path, raw)
            .with_context(|| format!("Failed to write index file: {index_path:?}"))?;

        Ok(())
    }

    /// Top-k entries by cosine similarity, highest first. An empty
    /// store returns an empty result, not an error.
    pub fn similarity_search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        scored
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cosine similarity in [-1, 1]; 0.0 for zero-norm vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
