use anyhow::{Result, ensure};

use crate::document::{Chunk, Document};

/// Splitting parameters. Sizes are measured in characters.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub separators: Vec<String>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 150,
            separators: vec![
                "\n\n".to_string(),
                "\n".to_string(),
                ".".to_string(),
                "!".to_string(),
                "?".to_string(),
                " ".to_string(),
            ],
        }
    }
}

/// Recursive-by-separator text splitter.
///
/// Tries each separator in order; fragments still over `chunk_size`
/// recurse on the remaining separators, and only fall back to raw
/// character windows when no separator is left. Fragments keep their
/// trailing separator, so merged chunks reproduce the source text
/// exactly (modulo the overlap regions). Pure: same input and config
/// always produce the same chunk sequence.
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    pub fn new(config: SplitterConfig) -> Result<Self> {
        ensure!(
            config.chunk_overlap < config.chunk_size,
            "chunk_overlap ({}) must be smaller than chunk_size ({})",
            config.chunk_overlap,
            config.chunk_size,
        );
        Ok(Self { config })
    }

    /// Split raw text into segments of at most `chunk_size` characters
    /// with at most `chunk_overlap` characters shared between
    /// consecutive segments. Whitespace-only input yields nothing.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.config.separators)
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    /// Split a document and attach its metadata to every chunk.
    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        self.split_text(&document.content)
            .into_iter()
            .enumerate()
            .map(|(ordinal, content)| Chunk::new(content, document.metadata.clone(), ordinal))
            .collect()
    }

    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.split_document(doc))
            .collect()
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        if char_len(text) <= self.config.chunk_size {
            return vec![text.to_string()];
        }

        // First separator actually present in the text wins; the rest
        // stay available for oversized fragments.
        let Some(pos) = separators.iter().position(|sep| text.contains(sep.as_str())) else {
            return self.split_char_windows(text);
        };
        let separator = &separators[pos];
        let remaining = &separators[pos + 1..];

        let mut pending: Vec<String> = Vec::new();
        let mut chunks: Vec<String> = Vec::new();

        for fragment in text.split_inclusive(separator.as_str()) {
            if char_len(fragment) <= self.config.chunk_size {
                pending.push(fragment.to_string());
                continue;
            }
            // Oversized fragment: flush what we have in order, then
            // recurse with the finer separators.
            if !pending.is_empty() {
                chunks.extend(self.merge_fragments(std::mem::take(&mut pending)));
            }
            chunks.extend(self.split_recursive(fragment, remaining));
        }

        if !pending.is_empty() {
            chunks.extend(self.merge_fragments(pending));
        }

        chunks
    }

    /// Pack fragments (each already within `chunk_size`) into chunks,
    /// carrying a trailing window of fragments forward as overlap.
    fn merge_fragments(&self, fragments: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: Vec<String> = Vec::new();
        let mut window_len = 0usize;

        for fragment in fragments {
            let fragment_len = char_len(&fragment);

            if window_len + fragment_len > self.config.chunk_size && !window.is_empty() {
                chunks.push(window.concat());

                while !window.is_empty()
                    && (window_len > self.config.chunk_overlap
                        || window_len + fragment_len > self.config.chunk_size)
                {
                    let removed = window.remove(0);
                    window_len -= char_len(&removed);
                }
            }

            window_len += fragment_len;
            window.push(fragment);
        }

        if !window.is_empty() {
            chunks.push(window.concat());
        }

        chunks
    }

    // Last resort: fixed character windows stepping by size - overlap.
    fn split_char_windows(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let step = self.config.chunk_size - self.config.chunk_overlap;
        let mut windows = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.config.chunk_size).min(chars.len());
            windows.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }

        windows
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentMetadata;

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> TextSplitter {
        TextSplitter::new(SplitterConfig {
            chunk_size,
            chunk_overlap,
            ..SplitterConfig::default()
        })
        .unwrap()
    }

    /// Longest suffix of `a` that is also a prefix of `b`.
    fn shared_overlap(a: &str, b: &str) -> usize {
        let max = a.len().min(b.len());
        (0..=max)
            .rev()
            .find(|&n| a.ends_with(&b[..n]))
            .unwrap_or(0)
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = splitter(800, 150).split_text("Maya traveled north.");
        assert_eq!(chunks, vec!["Maya traveled north.".to_string()]);
    }

    #[test]
    fn whitespace_only_yields_no_chunks() {
        let chunks = splitter(800, 150).split_text("  \n\n   \n ");
        assert!(chunks.is_empty());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        let result = TextSplitter::new(SplitterConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..SplitterConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn splits_on_paragraph_boundaries_first() {
        let text = "First paragraph about the garden.\n\nSecond paragraph about the river.";
        let chunks = splitter(40, 10).split_text(text);

        assert!(chunks.len() >= 2);
        assert!(chunks[0].contains("First paragraph"));
        assert!(chunks.iter().all(|c| c.chars().count() <= 40));
    }

    #[test]
    fn respects_chunk_size_bound() {
        let text = "One ripe apple. Two green pears. Three small plums. Four fat figs. \
                    Five old dates. Six dry grapes. Seven red cherries."
            .to_string();
        let chunks = splitter(40, 10).split_text(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 40, "oversized chunk: {chunk:?}");
        }
    }

    #[test]
    fn overlap_between_consecutive_chunks_is_bounded() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let chunks = splitter(30, 12).split_text(text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert!(shared_overlap(&pair[0], &pair[1]) <= 12);
        }
    }

    #[test]
    fn covers_all_source_words() {
        let text = "The clockmaker wound his gears.\n\nHis apprentice swept the floor.\n\n\
                    Outside, snow settled over the village square.";
        let chunks = splitter(40, 10).split_text(text);
        let joined = chunks.concat();

        for word in text.split_whitespace() {
            assert!(joined.contains(word), "missing word: {word}");
        }
    }

    #[test]
    fn falls_back_to_character_windows() {
        let text = "x".repeat(100);
        let chunks = splitter(40, 10).split_text(&text);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 40));
        let total: usize = chunks.iter().map(|c| c.chars().count()).sum();
        // windows step by 30, so total length exceeds the source
        assert!(total >= 100);
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "A tale of two rivers.\n\nOne ran east, one ran west, and neither met the sea.";
        let splitter = splitter(30, 8);

        assert_eq!(splitter.split_text(text), splitter.split_text(text));
    }

    #[test]
    fn document_chunks_inherit_metadata() {
        let doc = Document::new(
            "The Lost Garden\n\nMaya traveled north.".to_string(),
            "data/garden.txt".to_string(),
            "The Lost Garden".to_string(),
        );
        let chunks = splitter(800, 150).split_document(&doc);

        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0].metadata,
            DocumentMetadata {
                source: "data/garden.txt".to_string(),
                story_title: "The Lost Garden".to_string(),
            }
        );
    }
}
