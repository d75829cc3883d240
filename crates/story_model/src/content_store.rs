//! Content store - single owner of all episodes and paragraphs
//!
//! Every mutation of narrative content goes through the operations below.
//! Lookups are by id; a miss is reported as an error and leaves the store
//! untouched, so callers that only care about the happy path can treat it
//! as a no-op.

use crate::{
    Episode, EpisodeId, EpisodePatch, Paragraph, ParagraphId, ParagraphKind, ParagraphPatch,
    Result, StoryError,
};
use serde::{Deserialize, Serialize};

/// Ordered collection of episodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStore {
    episodes: Vec<Episode>,
    /// Version counter, bumped on every successful mutation
    #[serde(skip)]
    version: u64,
}

impl ContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing episodes
    pub fn with_episodes(episodes: Vec<Episode>) -> Self {
        Self { episodes, version: 0 }
    }

    /// Import a story from JSON (`{"episodes": [...]}`)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Export the story as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn episode(&self, id: &EpisodeId) -> Option<&Episode> {
        self.episodes.iter().find(|e| &e.id == id)
    }

    pub fn episode_at(&self, index: usize) -> Option<&Episode> {
        self.episodes.get(index)
    }

    /// Index of an episode by id
    pub fn position_of(&self, id: &EpisodeId) -> Option<usize> {
        self.episodes.iter().position(|e| &e.id == id)
    }

    /// Resolve an (episode, paragraph) id pair to indices
    pub fn locate(&self, episode_id: &EpisodeId, paragraph_id: &ParagraphId) -> Option<(usize, usize)> {
        let episode_index = self.position_of(episode_id)?;
        let paragraph_index = self.episodes[episode_index].position_of(paragraph_id)?;
        Some((episode_index, paragraph_index))
    }

    /// Paragraph at the given indices
    pub fn paragraph_at(&self, episode_index: usize, paragraph_index: usize) -> Option<&Paragraph> {
        self.episodes.get(episode_index)?.paragraphs.get(paragraph_index)
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    fn episode_mut(&mut self, id: &EpisodeId) -> Result<&mut Episode> {
        self.episodes
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| StoryError::EpisodeNotFound(id.clone()))
    }

    // ------------------------------------------------------------------
    // Episode operations
    // ------------------------------------------------------------------

    /// Append a new empty episode and return its id
    pub fn add_episode(&mut self, title: impl Into<String>, background: Option<String>) -> EpisodeId {
        let id = EpisodeId::generate();
        let episode = Episode {
            id: id.clone(),
            title: title.into(),
            paragraphs: Vec::new(),
            background_image: background,
        };
        tracing::debug!(episode = %id, title = %episode.title, "episode added");
        self.episodes.push(episode);
        self.touch();
        id
    }

    /// Merge the given fields into an episode
    pub fn update_episode(&mut self, id: &EpisodeId, patch: EpisodePatch) -> Result<()> {
        self.episode_mut(id)?.apply(patch);
        self.touch();
        tracing::debug!(episode = %id, "episode updated");
        Ok(())
    }

    /// Remove an episode, keeping the others in order
    pub fn delete_episode(&mut self, id: &EpisodeId) -> Result<Episode> {
        let index = self
            .position_of(id)
            .ok_or_else(|| StoryError::EpisodeNotFound(id.clone()))?;
        let episode = self.episodes.remove(index);
        self.touch();
        tracing::debug!(episode = %id, index, "episode deleted");
        Ok(episode)
    }

    // ------------------------------------------------------------------
    // Paragraph operations
    // ------------------------------------------------------------------

    /// Append an empty paragraph of the given kind
    pub fn add_paragraph(&mut self, episode_id: &EpisodeId, kind: ParagraphKind) -> Result<ParagraphId> {
        self.push_paragraph(episode_id, Paragraph::empty(kind))
    }

    /// Append a prepared paragraph
    pub fn push_paragraph(&mut self, episode_id: &EpisodeId, paragraph: Paragraph) -> Result<ParagraphId> {
        let episode = self.episode_mut(episode_id)?;
        let id = paragraph.id.clone();
        episode.paragraphs.push(paragraph);
        self.touch();
        tracing::debug!(episode = %episode_id, paragraph = %id, "paragraph added");
        Ok(id)
    }

    /// Merge the given fields into a paragraph
    pub fn update_paragraph(
        &mut self,
        episode_id: &EpisodeId,
        paragraph_id: &ParagraphId,
        patch: ParagraphPatch,
    ) -> Result<()> {
        let paragraph = self
            .episode_mut(episode_id)?
            .paragraph_mut(paragraph_id)
            .ok_or_else(|| StoryError::ParagraphNotFound {
                episode: episode_id.clone(),
                paragraph: paragraph_id.clone(),
            })?;
        paragraph.apply(patch)?;
        self.touch();
        tracing::debug!(episode = %episode_id, paragraph = %paragraph_id, "paragraph updated");
        Ok(())
    }

    /// Remove a paragraph, keeping the others in order
    pub fn delete_paragraph(&mut self, episode_id: &EpisodeId, paragraph_id: &ParagraphId) -> Result<Paragraph> {
        let episode = self.episode_mut(episode_id)?;
        let index = episode
            .position_of(paragraph_id)
            .ok_or_else(|| StoryError::ParagraphNotFound {
                episode: episode_id.clone(),
                paragraph: paragraph_id.clone(),
            })?;
        let paragraph = episode.paragraphs.remove(index);
        self.touch();
        tracing::debug!(episode = %episode_id, paragraph = %paragraph_id, index, "paragraph deleted");
        Ok(paragraph)
    }

    /// Move the paragraph at `from` so it ends up at `to`.
    ///
    /// The element is removed first and then inserted, so `to` is an index
    /// into the shortened sequence. Both indices must be in range.
    pub fn move_paragraph(&mut self, episode_id: &EpisodeId, from: usize, to: usize) -> Result<()> {
        let episode = self.episode_mut(episode_id)?;
        let len = episode.paragraphs.len();
        for index in [from, to] {
            if index >= len {
                return Err(StoryError::IndexOutOfRange { index, len });
            }
        }

        if from != to {
            let paragraph = episode.paragraphs.remove(from);
            episode.paragraphs.insert(to, paragraph);
        }
        self.touch();
        tracing::debug!(episode = %episode_id, from, to, "paragraph moved");
        Ok(())
    }
}
