//! Bookmarks - saved reading positions
//!
//! A bookmark names a paragraph by id and does not own it. Deleting the
//! episode or paragraph it points at leaves the bookmark in place; consumers
//! resolve it lazily and treat a miss as "unavailable".

use crate::{ContentStore, EpisodeId, ParagraphId};
use serde::{Deserialize, Serialize};

/// A saved reference to a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub episode_id: EpisodeId,
    pub paragraph_id: ParagraphId,
    /// User-facing label
    pub note: String,
}

impl Bookmark {
    fn matches(&self, episode_id: &EpisodeId, paragraph_id: &ParagraphId) -> bool {
        &self.episode_id == episode_id && &self.paragraph_id == paragraph_id
    }

    /// Whether the bookmarked paragraph still exists
    pub fn is_resolvable(&self, store: &ContentStore) -> bool {
        store.locate(&self.episode_id, &self.paragraph_id).is_some()
    }
}

/// Result of toggling a bookmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkToggle {
    Added,
    Removed,
}

/// Ordered set of bookmarks, at most one per paragraph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the bookmark on this paragraph if there is one, otherwise
    /// append a new one with the given note
    pub fn toggle(
        &mut self,
        episode_id: &EpisodeId,
        paragraph_id: &ParagraphId,
        note: impl Into<String>,
    ) -> BookmarkToggle {
        if let Some(pos) = self
            .bookmarks
            .iter()
            .position(|b| b.matches(episode_id, paragraph_id))
        {
            self.bookmarks.remove(pos);
            BookmarkToggle::Removed
        } else {
            self.bookmarks.push(Bookmark {
                episode_id: episode_id.clone(),
                paragraph_id: paragraph_id.clone(),
                note: note.into(),
            });
            BookmarkToggle::Added
        }
    }

    pub fn is_bookmarked(&self, episode_id: &EpisodeId, paragraph_id: &ParagraphId) -> bool {
        self.bookmarks
            .iter()
            .any(|b| b.matches(episode_id, paragraph_id))
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.bookmarks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}
