use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

use crate::document::Document;

/// First non-blank trimmed line of the text, else the fallback.
pub fn guess_story_title(text: &str, fallback: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Load every regular file under `data_dir` (recursively) as one
/// Document. Non-files are skipped; a file that fails to read as UTF-8
/// is skipped with a warning rather than failing the whole run.
pub async fn load_story_documents(data_dir: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(data_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory: {data_dir:?}"))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                continue;
            }
        };

        let fallback = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("untitled");
        let story_title = guess_story_title(&content, fallback);

        documents.push(Document::new(
            content,
            path.to_string_lossy().to_string(),
            story_title,
        ));
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_first_non_blank_line() {
        let text = "\n   \nThe Lost Garden\n\nMaya traveled north.";
        assert_eq!(guess_story_title(text, "garden"), "The Lost Garden");
    }

    #[test]
    fn title_falls_back_for_blank_text() {
        assert_eq!(guess_story_title("  \n \n", "garden"), "garden");
    }

    #[tokio::test]
    async fn loads_files_recursively_with_titles() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            dir.path().join("garden.txt"),
            "The Lost Garden\n\nMaya traveled north.",
        )
        .unwrap();
        std::fs::write(nested.join("blank.txt"), "   \n").unwrap();

        let docs = load_story_documents(dir.path()).await.unwrap();

        assert_eq!(docs.len(), 2);
        let garden = docs
            .iter()
            .find(|d| d.metadata.source.ends_with("garden.txt"))
            .unwrap();
        assert_eq!(garden.metadata.story_title, "The Lost Garden");

        // entirely blank file falls back to the filename stem
        let blank = docs
            .iter()
            .find(|d| d.metadata.source.ends_with("blank.txt"))
            .unwrap();
        assert_eq!(blank.metadata.story_title, "blank");
    }
}
