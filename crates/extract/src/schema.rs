use serde::{Deserialize, Serialize};

/// One relation of the character to another named entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRelation {
    pub name: String,
    pub relation: String,
}

/// Role of the character in the story. Unrecognized values from the
/// model decode as `Unknown` rather than failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CharacterType {
    Protagonist,
    Antagonist,
    SideCharacter,
    Unknown,
}

impl Default for CharacterType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl From<String> for CharacterType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "protagonist" => Self::Protagonist,
            "antagonist" => Self::Antagonist,
            "side character" => Self::SideCharacter,
            _ => Self::Unknown,
        }
    }
}

impl From<CharacterType> for String {
    fn from(value: CharacterType) -> Self {
        match value {
            CharacterType::Protagonist => "protagonist",
            CharacterType::Antagonist => "antagonist",
            CharacterType::SideCharacter => "side character",
            CharacterType::Unknown => "unknown",
        }
        .to_string()
    }
}

/// Successful extraction. `name` is required; the prompt instructs the
/// model to fill missing fields with empty strings or lists, so the
/// remaining fields tolerate omission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub name: String,
    #[serde(rename = "storyTitle", default)]
    pub story_title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub relations: Vec<CharacterRelation>,
    #[serde(rename = "characterType", default)]
    pub character_type: CharacterType,
}

/// Structured failure, returned through the same channel as success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaned_attempt: Option<String>,
}

impl ExtractionError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_output: None,
            cleaned_attempt: None,
        }
    }
}

/// Terminal result of a character query: exactly the success shape or
/// exactly the error shape. The error variant comes first so that any
/// object carrying an `error` key decodes as a failure; callers
/// distinguish the two by key set, never by exception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Error(ExtractionError),
    Character(CharacterInfo),
}

impl ExtractionResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ExtractionError::new(message))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
