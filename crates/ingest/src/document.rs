use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Provenance carried by every document and inherited by its chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub story_title: String,
}

/// One story file, loaded whole. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(content: String, source: String, story_title: String) -> Self {
        Self {
            content,
            metadata: DocumentMetadata {
                source,
                story_title,
            },
        }
    }
}

/// A bounded segment of a document, the atomic retrieval unit.
/// Inherits the parent document's metadata unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Chunk {
    pub fn new(content: String, metadata: DocumentMetadata, ordinal: usize) -> Self {
        let chunk_id = Self::generate_chunk_id(&metadata.source, &content, ordinal);

        Self {
            chunk_id,
            content,
            metadata,
        }
    }

    // Stable id over (source, content, ordinal) so re-chunking the same
    // corpus yields the same ids.
    fn generate_chunk_id(source: &str, content: &str, ordinal: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update(content.as_bytes());
        hasher.update(ordinal.to_string().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }
}
