//! Episode - a titled, ordered chapter of paragraphs

use crate::{EpisodeId, Paragraph, ParagraphId};
use serde::{Deserialize, Serialize};

/// A chapter of the story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    /// Paragraphs in reading order
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl Episode {
    /// Create an empty episode
    pub fn new(id: impl Into<EpisodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            paragraphs: Vec::new(),
            background_image: None,
        }
    }

    pub fn with_background(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    /// Index of a paragraph by id
    pub fn position_of(&self, paragraph_id: &ParagraphId) -> Option<usize> {
        self.paragraphs.iter().position(|p| &p.id == paragraph_id)
    }

    pub fn paragraph(&self, paragraph_id: &ParagraphId) -> Option<&Paragraph> {
        self.paragraphs.iter().find(|p| &p.id == paragraph_id)
    }

    pub fn paragraph_mut(&mut self, paragraph_id: &ParagraphId) -> Option<&mut Paragraph> {
        self.paragraphs.iter_mut().find(|p| &p.id == paragraph_id)
    }

    /// Scene image behind the paragraph at `index`: its own image if it has
    /// one, otherwise the episode background
    pub fn backdrop_for(&self, index: usize) -> Option<&str> {
        self.paragraphs
            .get(index)
            .and_then(|p| p.image.as_deref())
            .or(self.background_image.as_deref())
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: EpisodePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(background) = patch.background_image {
            self.background_image = Some(background);
        }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Partial update of an episode; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodePatch {
    pub title: Option<String>,
    pub background_image: Option<String>,
}

impl EpisodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_background(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }
}
