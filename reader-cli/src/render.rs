//! Plain-text rendering of the reader view

use reader_engine::ReaderSession;
use std::fmt::Write;
use story_model::ParagraphContent;

/// The current page: episode header, paragraph body, and footer
pub fn page(session: &ReaderSession) -> String {
    let mut out = String::new();
    let Some(episode) = session.current_episode() else {
        return "(no episodes)\n".to_string();
    };

    let _ = writeln!(out, "== {} ==", episode.title);
    if let Some(backdrop) = session.backdrop() {
        let _ = writeln!(out, "[scene: {backdrop}]");
    }

    match session.current_paragraph() {
        None => out.push_str("(this episode has no paragraphs yet)\n"),
        Some(paragraph) => {
            match paragraph.content() {
                ParagraphContent::Text(text) => {
                    let _ = writeln!(out, "{text}");
                }
                ParagraphContent::Dialog(lines) => {
                    for line in lines {
                        let speaker = session.characters().speaker(line);
                        let name = speaker.name.unwrap_or("?");
                        match &line.emotion {
                            Some(emotion) => {
                                let _ = writeln!(out, "{name} ({emotion}): {}", line.text);
                            }
                            None => {
                                let _ = writeln!(out, "{name}: {}", line.text);
                            }
                        }
                    }
                }
            }
            if let Some(image) = paragraph.illustration() {
                let _ = writeln!(out, "[illustration: {image}]");
            }
        }
    }

    if let Some((number, total)) = session.progress() {
        let marker = if session.is_current_bookmarked() { " *" } else { "" };
        let back = if session.can_retreat() { "<" } else { " " };
        let forward = if session.can_advance() { ">" } else { " " };
        let _ = writeln!(out, "{back} {number} / {total}{marker} {forward}");
    }
    out
}

/// Numbered bookmark list; unavailable entries are flagged
pub fn bookmarks(session: &ReaderSession) -> String {
    if session.bookmarks().is_empty() {
        return "No saved bookmarks\n".to_string();
    }
    let mut out = String::new();
    for (i, bookmark) in session.bookmarks().iter().enumerate() {
        let stale = if bookmark.is_resolvable(session.store()) {
            ""
        } else {
            " (unavailable)"
        };
        let _ = writeln!(out, "{}. {}{stale}", i + 1, bookmark.note);
    }
    out
}

/// Character list with gallery previews, and the open character card
pub fn characters(session: &ReaderSession) -> String {
    let mut out = String::new();
    for character in session.characters().iter() {
        let _ = writeln!(out, "[{}] {}: {}", character.id, character.name, character.description);
        for image in session.gallery_preview(character) {
            let _ = writeln!(out, "    {image}");
        }
    }
    if let Some(selected) = session.selected_character() {
        let _ = writeln!(out, "-- {} --", selected.name);
        for image in &selected.gallery {
            let _ = writeln!(out, "    {image}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reader_engine::{ReaderEvent, ReaderSettings};

    #[test]
    fn test_dialog_page() {
        let mut session = ReaderSession::demo(ReaderSettings::default());
        session.dispatch(ReaderEvent::Next);
        session.dispatch(ReaderEvent::ToggleBookmark);

        let page = page(&session);
        assert!(page.starts_with("== Chapter 1. Arrival =="));
        assert!(page.contains("Anna (happy): Finally..."));
        assert!(page.contains("< 2 / 4 * >"));
    }

    #[test]
    fn test_bookmark_list_flags_stale_entries() {
        let mut session = ReaderSession::demo(ReaderSettings::default());
        session.dispatch(ReaderEvent::ToggleBookmark);
        assert_eq!(bookmarks(&session), "1. Chapter 1. Arrival - Paragraph 1\n");

        session
            .delete_paragraph(&"1".into(), &"1-1".into())
            .unwrap();
        assert!(bookmarks(&session).ends_with("(unavailable)\n"));
    }
}
