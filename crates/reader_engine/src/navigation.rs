//! Reading cursor and paragraph-by-paragraph navigation
//!
//! The cursor is a pair of indices into the content store. Moving forward
//! walks every paragraph of an episode before stepping into the next
//! episode; moving backward is symmetric and enters the previous episode at
//! its last paragraph.
//!
//! Episodes created from the authoring panel start out empty. The cursor
//! parks at paragraph 0 of such an episode and `paragraph()` returns `None`.

use serde::{Deserialize, Serialize};
use story_model::{ContentStore, Episode, EpisodeId, Paragraph, ParagraphId, StoryError};

/// Result of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved
    Moved,
    /// The cursor is already at the first or last position
    AtBoundary,
}

/// Ids of the paragraph under the cursor, used to follow it across edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub episode_id: EpisodeId,
    /// `None` when the episode has no paragraphs
    pub paragraph_id: Option<ParagraphId>,
}

/// The reader's position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub episode_index: usize,
    pub paragraph_index: usize,
}

fn paragraph_count(store: &ContentStore, episode_index: usize) -> usize {
    store.episode_at(episode_index).map_or(0, Episode::len)
}

impl Cursor {
    pub fn new(episode_index: usize, paragraph_index: usize) -> Self {
        Self {
            episode_index,
            paragraph_index,
        }
    }

    /// Whether the cursor points at a real position in the store
    pub fn is_valid(&self, store: &ContentStore) -> bool {
        if self.episode_index >= store.len() {
            return false;
        }
        let count = paragraph_count(store, self.episode_index);
        self.paragraph_index < count || (count == 0 && self.paragraph_index == 0)
    }

    pub fn episode<'a>(&self, store: &'a ContentStore) -> Option<&'a Episode> {
        store.episode_at(self.episode_index)
    }

    pub fn paragraph<'a>(&self, store: &'a ContentStore) -> Option<&'a Paragraph> {
        store.paragraph_at(self.episode_index, self.paragraph_index)
    }

    pub fn can_advance(&self, store: &ContentStore) -> bool {
        self.paragraph_index + 1 < paragraph_count(store, self.episode_index)
            || self.episode_index + 1 < store.len()
    }

    pub fn can_retreat(&self, store: &ContentStore) -> bool {
        !store.is_empty() && (self.paragraph_index > 0 || self.episode_index > 0)
    }

    /// Advance one paragraph, crossing into the next episode at the end of
    /// the current one
    pub fn next(&mut self, store: &ContentStore) -> Step {
        if self.paragraph_index + 1 < paragraph_count(store, self.episode_index) {
            self.paragraph_index += 1;
        } else if self.episode_index + 1 < store.len() {
            self.episode_index += 1;
            self.paragraph_index = 0;
        } else {
            return Step::AtBoundary;
        }
        Step::Moved
    }

    /// Go back one paragraph, entering the previous episode at its last
    /// paragraph
    pub fn prev(&mut self, store: &ContentStore) -> Step {
        if store.is_empty() {
            return Step::AtBoundary;
        }
        if self.paragraph_index > 0 {
            self.paragraph_index -= 1;
        } else if self.episode_index > 0 {
            self.episode_index -= 1;
            self.paragraph_index = paragraph_count(store, self.episode_index).saturating_sub(1);
        } else {
            return Step::AtBoundary;
        }
        Step::Moved
    }

    /// Jump straight to a paragraph by id. The cursor is left unchanged if
    /// either id no longer resolves.
    pub fn jump_to(
        &mut self,
        store: &ContentStore,
        episode_id: &EpisodeId,
        paragraph_id: &ParagraphId,
    ) -> story_model::Result<()> {
        let episode_index = store
            .position_of(episode_id)
            .ok_or_else(|| StoryError::EpisodeNotFound(episode_id.clone()))?;
        let paragraph_index = store.episodes()[episode_index]
            .position_of(paragraph_id)
            .ok_or_else(|| StoryError::ParagraphNotFound {
                episode: episode_id.clone(),
                paragraph: paragraph_id.clone(),
            })?;
        *self = Self::new(episode_index, paragraph_index);
        Ok(())
    }

    /// 1-based paragraph number and paragraph count of the current episode;
    /// `(0, 0)` in an empty episode
    pub fn progress(&self, store: &ContentStore) -> Option<(usize, usize)> {
        let episode = self.episode(store)?;
        if episode.is_empty() {
            return Some((0, 0));
        }
        Some((self.paragraph_index + 1, episode.len()))
    }

    /// Force the cursor back into range
    pub fn clamp(&mut self, store: &ContentStore) {
        if store.is_empty() {
            *self = Self::default();
            return;
        }
        self.episode_index = self.episode_index.min(store.len() - 1);
        let count = paragraph_count(store, self.episode_index);
        self.paragraph_index = self.paragraph_index.min(count.saturating_sub(1));
    }

    /// Ids of the current position
    pub fn anchor(&self, store: &ContentStore) -> Option<Anchor> {
        let episode = self.episode(store)?;
        Some(Anchor {
            episode_id: episode.id.clone(),
            paragraph_id: self.paragraph(store).map(|p| p.id.clone()),
        })
    }

    /// Move the cursor back onto an anchor taken before the store changed.
    ///
    /// Falls back to the same index within the anchor's episode when the
    /// paragraph is gone, and to the start of the episode that took its slot
    /// when the episode is gone.
    pub fn restore(&mut self, store: &ContentStore, anchor: &Anchor) {
        match store.position_of(&anchor.episode_id) {
            Some(episode_index) => {
                let paragraph_index = anchor
                    .paragraph_id
                    .as_ref()
                    .and_then(|id| store.episodes()[episode_index].position_of(id));
                self.episode_index = episode_index;
                if let Some(paragraph_index) = paragraph_index {
                    self.paragraph_index = paragraph_index;
                }
            }
            None => {
                // Deleted episode: its successor shifted into this slot
                tracing::debug!(episode = %anchor.episode_id, "cursor episode removed");
                self.paragraph_index = 0;
            }
        }
        self.clamp(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_model::sample;

    fn walk_forward(store: &ContentStore) -> Vec<Cursor> {
        let mut cursor = Cursor::default();
        let mut seen = vec![cursor];
        while cursor.next(store) == Step::Moved {
            seen.push(cursor);
        }
        seen
    }

    #[test]
    fn test_forward_walk_visits_every_paragraph() {
        let store = sample::story();
        let seen = walk_forward(&store);
        assert_eq!(
            seen,
            vec![
                Cursor::new(0, 0),
                Cursor::new(0, 1),
                Cursor::new(0, 2),
                Cursor::new(0, 3),
                Cursor::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_prev_enters_previous_episode_at_last_paragraph() {
        let store = sample::story();
        let mut cursor = Cursor::new(1, 0);
        assert_eq!(cursor.prev(&store), Step::Moved);
        assert_eq!(cursor, Cursor::new(0, 3));
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let store = sample::story();

        let mut start = Cursor::default();
        assert!(!start.can_retreat(&store));
        assert_eq!(start.prev(&store), Step::AtBoundary);
        assert_eq!(start, Cursor::default());

        let mut end = Cursor::new(1, 0);
        assert!(!end.can_advance(&store));
        assert_eq!(end.next(&store), Step::AtBoundary);
        assert_eq!(end, Cursor::new(1, 0));
    }

    #[test]
    fn test_empty_store() {
        let store = ContentStore::new();
        let mut cursor = Cursor::default();
        assert!(!cursor.is_valid(&store));
        assert_eq!(cursor.next(&store), Step::AtBoundary);
        assert_eq!(cursor.prev(&store), Step::AtBoundary);
        assert!(cursor.paragraph(&store).is_none());
        assert!(cursor.progress(&store).is_none());
    }

    #[test]
    fn test_empty_episode_is_passed_through() {
        let mut store = sample::story();
        let empty = store.add_episode("Empty", None);
        let last = store.add_episode("Last", None);
        store
            .add_paragraph(&last, story_model::ParagraphKind::Text)
            .unwrap();

        let mut cursor = Cursor::new(1, 0);
        cursor.next(&store);
        assert_eq!(cursor, Cursor::new(2, 0));
        assert!(cursor.is_valid(&store));
        assert!(cursor.paragraph(&store).is_none());
        assert_eq!(cursor.episode(&store).unwrap().id, empty);

        cursor.next(&store);
        assert_eq!(cursor, Cursor::new(3, 0));
        cursor.prev(&store);
        assert_eq!(cursor, Cursor::new(2, 0));
        cursor.prev(&store);
        assert_eq!(cursor, Cursor::new(1, 0));
    }

    #[test]
    fn test_jump_to_and_miss() {
        let mut store = sample::story();
        let mut cursor = Cursor::default();
        cursor
            .jump_to(&store, &EpisodeId::new("1"), &ParagraphId::new("1-3"))
            .unwrap();
        assert_eq!(cursor, Cursor::new(0, 2));

        store
            .delete_paragraph(&EpisodeId::new("2"), &ParagraphId::new("2-1"))
            .unwrap();
        let err = cursor
            .jump_to(&store, &EpisodeId::new("2"), &ParagraphId::new("2-1"))
            .unwrap_err();
        assert!(err.is_lookup_miss());
        assert_eq!(cursor, Cursor::new(0, 2));

        let err = cursor
            .jump_to(&store, &EpisodeId::new("9"), &ParagraphId::new("1-1"))
            .unwrap_err();
        assert!(matches!(err, StoryError::EpisodeNotFound(_)));
    }

    #[test]
    fn test_progress() {
        let store = sample::story();
        assert_eq!(Cursor::new(0, 2).progress(&store), Some((3, 4)));
        assert_eq!(Cursor::new(1, 0).progress(&store), Some((1, 1)));
    }

    #[test]
    fn test_progress_in_empty_episode() {
        let mut store = sample::story();
        store.add_episode("Empty", None);
        assert_eq!(Cursor::new(2, 0).progress(&store), Some((0, 0)));
    }

    #[test]
    fn test_restore_follows_paragraph_after_reorder() {
        let mut store = sample::story();
        let ep = EpisodeId::new("1");
        let mut cursor = Cursor::new(0, 3);
        let anchor = cursor.anchor(&store).unwrap();

        store.move_paragraph(&ep, 3, 0).unwrap();
        cursor.restore(&store, &anchor);
        assert_eq!(cursor, Cursor::new(0, 0));
        assert_eq!(cursor.paragraph(&store).unwrap().id.as_str(), "1-4");
    }

    #[test]
    fn test_restore_after_deletions() {
        let mut store = sample::story();
        let mut cursor = Cursor::new(0, 3);
        let anchor = cursor.anchor(&store).unwrap();

        store
            .delete_paragraph(&EpisodeId::new("1"), &ParagraphId::new("1-4"))
            .unwrap();
        cursor.restore(&store, &anchor);
        assert_eq!(cursor, Cursor::new(0, 2));

        let mut cursor = Cursor::new(1, 0);
        let anchor = cursor.anchor(&store).unwrap();
        store.delete_episode(&EpisodeId::new("2")).unwrap();
        cursor.restore(&store, &anchor);
        assert_eq!(cursor, Cursor::new(0, 0));
        assert!(cursor.is_valid(&store));
    }

    #[test]
    fn test_restore_after_episode_removed_starts_successor() {
        let mut store = sample::story();
        let next = EpisodeId::new("2");
        for _ in 0..3 {
            store.add_paragraph(&next, story_model::ParagraphKind::Text).unwrap();
        }
        let mut cursor = Cursor::new(0, 2);
        let anchor = cursor.anchor(&store).unwrap();

        store.delete_episode(&EpisodeId::new("1")).unwrap();
        cursor.restore(&store, &anchor);
        assert_eq!(cursor, Cursor::new(0, 0));
        assert_eq!(cursor.paragraph(&store).unwrap().id.as_str(), "2-1");
    }
}
