//! Paragraph - the atomic narrative unit of an episode

use crate::{CharacterId, ParagraphId, Result, StoryError};
use serde::{Deserialize, Serialize};

/// One spoken line in a dialog paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogLine {
    pub character_id: CharacterId,
    pub text: String,
    /// Free-form emotion label (e.g. "happy", "shy")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl DialogLine {
    pub fn new(character_id: impl Into<CharacterId>, text: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            text: text.into(),
            emotion: None,
        }
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }
}

/// Kind of a paragraph, fixed when the paragraph is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphKind {
    Text,
    Dialog,
}

/// Body of a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum ParagraphContent {
    /// Narrative prose
    Text(String),
    /// Character dialog, in speaking order
    Dialog(Vec<DialogLine>),
}

impl ParagraphContent {
    /// Empty content of the given kind
    pub fn empty(kind: ParagraphKind) -> Self {
        match kind {
            ParagraphKind::Text => ParagraphContent::Text(String::new()),
            ParagraphKind::Dialog => ParagraphContent::Dialog(Vec::new()),
        }
    }

    pub fn kind(&self) -> ParagraphKind {
        match self {
            ParagraphContent::Text(_) => ParagraphKind::Text,
            ParagraphContent::Dialog(_) => ParagraphKind::Dialog,
        }
    }
}

/// A paragraph of an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: ParagraphId,
    #[serde(flatten)]
    content: ParagraphContent,
    /// Illustration locator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Paragraph {
    /// Create an empty paragraph of the given kind with a fresh id
    pub fn empty(kind: ParagraphKind) -> Self {
        Self {
            id: ParagraphId::generate(),
            content: ParagraphContent::empty(kind),
            image: None,
        }
    }

    /// Create a text paragraph
    pub fn text(id: impl Into<ParagraphId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: ParagraphContent::Text(text.into()),
            image: None,
        }
    }

    /// Create a dialog paragraph
    pub fn dialog(id: impl Into<ParagraphId>, lines: Vec<DialogLine>) -> Self {
        Self {
            id: id.into(),
            content: ParagraphContent::Dialog(lines),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn kind(&self) -> ParagraphKind {
        self.content.kind()
    }

    pub fn content(&self) -> &ParagraphContent {
        &self.content
    }

    /// Inline illustration; only text paragraphs show one
    pub fn illustration(&self) -> Option<&str> {
        match self.content {
            ParagraphContent::Text(_) => self.image.as_deref(),
            ParagraphContent::Dialog(_) => None,
        }
    }

    /// Merge a partial update into this paragraph.
    ///
    /// Replacement content must keep the paragraph's kind; on mismatch
    /// nothing is changed.
    pub fn apply(&mut self, patch: ParagraphPatch) -> Result<()> {
        if let Some(content) = &patch.content {
            if content.kind() != self.kind() {
                return Err(StoryError::KindMismatch {
                    expected: self.kind(),
                    found: content.kind(),
                });
            }
        }

        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        Ok(())
    }
}

/// Partial update of a paragraph; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphPatch {
    pub content: Option<ParagraphContent>,
    pub image: Option<String>,
}

impl ParagraphPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(ParagraphContent::Text(text.into()));
        self
    }

    pub fn with_dialog(mut self, lines: Vec<DialogLine>) -> Self {
        self.content = Some(ParagraphContent::Dialog(lines));
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.image.is_none()
    }
}
