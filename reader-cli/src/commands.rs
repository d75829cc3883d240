//! Parsing of terminal input lines into reader events

use anyhow::{anyhow, bail, Context, Result};
use reader_engine::ReaderEvent;
use story_model::{CharacterId, EpisodeId, EpisodePatch, ParagraphId, ParagraphKind};

pub const HELP: &str = "\
reading:    n | next, p | prev, b | bookmark, bookmarks, goto <index>
characters: chars, char <id>, hide
authoring:  admin, close, edit <episode>, add-episode, title <episode> <text>,
            bg <episode> <url>, del-episode <episode>, add-text <episode> <text>,
            add-dialog <episode>, del <episode> <paragraph>, move <episode> <from> <to>,
            drag <paragraph>, over, drop <episode> <index>
other:      event <json>, export, help, quit";

/// A parsed input line
#[derive(Debug, PartialEq)]
pub enum Command {
    Event(ReaderEvent),
    ListBookmarks,
    ListCharacters,
    Export,
    Help,
    Quit,
}

fn arg<'a>(args: &mut impl Iterator<Item = &'a str>, name: &str) -> Result<&'a str> {
    args.next().ok_or_else(|| anyhow!("missing <{name}>"))
}

fn index(raw: &str) -> Result<usize> {
    raw.parse()
        .with_context(|| format!("expected an index, got {raw:?}"))
}

fn rest<'a>(args: impl Iterator<Item = &'a str>) -> String {
    args.collect::<Vec<_>>().join(" ")
}

/// Parse one input line. Bookmark indices are 1-based, as listed.
pub fn parse(line: &str) -> Result<Command> {
    let mut args = line.split_whitespace();
    let Some(verb) = args.next() else {
        bail!("empty command");
    };

    let event = match verb {
        "n" | "next" => ReaderEvent::Next,
        "p" | "prev" => ReaderEvent::Prev,
        "b" | "bookmark" => ReaderEvent::ToggleBookmark,
        "bookmarks" => return Ok(Command::ListBookmarks),
        "goto" => {
            let number = index(arg(&mut args, "index")?)?;
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow!("bookmarks are numbered from 1"))?;
            ReaderEvent::SelectBookmark { index }
        }
        "chars" => return Ok(Command::ListCharacters),
        "char" => ReaderEvent::ShowCharacter {
            character_id: CharacterId::new(arg(&mut args, "id")?),
        },
        "hide" => ReaderEvent::HideCharacter,
        "admin" => ReaderEvent::OpenAuthoring,
        "close" => ReaderEvent::CloseAuthoring,
        "edit" => ReaderEvent::EditEpisode {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
        },
        "add-episode" => ReaderEvent::AddEpisode,
        "title" => ReaderEvent::UpdateEpisode {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
            patch: EpisodePatch::new().with_title(rest(args)),
        },
        "bg" => ReaderEvent::UpdateEpisode {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
            patch: EpisodePatch::new().with_background(arg(&mut args, "url")?),
        },
        "del-episode" => ReaderEvent::DeleteEpisode {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
        },
        "add-text" => ReaderEvent::AddTextParagraph {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
            text: rest(args),
        },
        "add-dialog" => ReaderEvent::AddParagraph {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
            kind: ParagraphKind::Dialog,
        },
        "del" => ReaderEvent::DeleteParagraph {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
            paragraph_id: ParagraphId::new(arg(&mut args, "paragraph")?),
        },
        "move" => ReaderEvent::MoveParagraph {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
            from: index(arg(&mut args, "from")?)?,
            to: index(arg(&mut args, "to")?)?,
        },
        "drag" => ReaderEvent::DragStart {
            paragraph_id: ParagraphId::new(arg(&mut args, "paragraph")?),
        },
        "over" => ReaderEvent::DragOver,
        "drop" => ReaderEvent::Drop {
            episode_id: EpisodeId::new(arg(&mut args, "episode")?),
            target_index: index(arg(&mut args, "index")?)?,
        },
        "event" => {
            let json = line.trim_start().trim_start_matches("event").trim();
            serde_json::from_str(json).context("invalid event JSON")?
        }
        "export" => return Ok(Command::Export),
        "help" | "?" => return Ok(Command::Help),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        other => bail!("unknown command {other:?}, try `help`"),
    };
    Ok(Command::Event(event))
}
