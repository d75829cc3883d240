//! Demo story bundled with the reader
//!
//! Two characters and two short chapters, used as the opening content of a
//! fresh session and as a fixture in tests.

use crate::{Character, CharacterRegistry, ContentStore, DialogLine, Episode, Paragraph};

const UNSPLASH: &str = "https://images.unsplash.com";

fn image(id: &str, w: u32, h: u32) -> String {
    format!("{UNSPLASH}/{id}?w={w}&h={h}&fit=crop")
}

/// The two characters of the demo story
pub fn characters() -> CharacterRegistry {
    CharacterRegistry::new(vec![
        Character::new(
            "1",
            "Anna",
            "The heroine. A young painter looking for inspiration in a quiet seaside town.",
            image("photo-1494790108377-be9c29b29330", 200, 200),
        )
        .with_gallery_image(image("photo-1494790108377-be9c29b29330", 400, 600))
        .with_gallery_image(image("photo-1529626455594-4ff0802cfb7e", 400, 600)),
        Character::new(
            "2",
            "Max",
            "A mysterious writer who lives in an old mansion at the edge of town.",
            image("photo-1507003211169-0a1dd7228f2d", 200, 200),
        )
        .with_gallery_image(image("photo-1507003211169-0a1dd7228f2d", 400, 600))
        .with_gallery_image(image("photo-1500648767791-00dcc994a43e", 400, 600)),
    ])
}

/// The two chapters of the demo story
pub fn story() -> ContentStore {
    let arrival = Episode::new("1", "Chapter 1. Arrival")
        .with_background(image("photo-1507525428034-b723cf961d3e", 1200, 800))
        .with_paragraph(
            Paragraph::text(
                "1-1",
                "The old bus stopped on the dusty square of the little seaside town. \
                 Anna got off last, clutching a worn suitcase and a folder of sketches.",
            )
            .with_image(image("photo-1464207687429-7505649dae38", 800, 600)),
        )
        .with_paragraph(Paragraph::dialog(
            "1-2",
            vec![DialogLine::new("1", "Finally... I've dreamed of being here for so long.")
                .with_emotion("happy")],
        ))
        .with_paragraph(Paragraph::text(
            "1-3",
            "The sun was sinking, painting the sky pink and gold. \
             The smell of the sea mixed with the scent of blooming oleanders.",
        ))
        .with_paragraph(Paragraph::dialog(
            "1-4",
            vec![
                DialogLine::new("2", "New in town? We rarely get tourists this time of year.")
                    .with_emotion("neutral"),
                DialogLine::new("1", "I'm not a tourist. I came to work... to paint.")
                    .with_emotion("shy"),
            ],
        ));

    let first_meeting = Episode::new("2", "Chapter 2. First Meeting")
        .with_background(image("photo-1519681393784-d120267933ba", 1200, 800))
        .with_paragraph(Paragraph::text(
            "2-1",
            "The next morning Anna set out to explore. Narrow lanes led down to the rocky \
             shore, where an old lighthouse rose above the turquoise waves.",
        ));

    ContentStore::with_episodes(vec![arrival, first_meeting])
}
