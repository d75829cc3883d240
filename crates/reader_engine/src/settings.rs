//! Reader settings
//!
//! Defaults for the authoring panel and the reading view, loaded from a
//! `settings.json` file in the application data directory.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReaderSettings {
    /// Authoring panel settings
    #[serde(default)]
    pub authoring: AuthoringSettings,
    /// Reading view settings
    #[serde(default)]
    pub reading: ReadingSettings,
}

/// Authoring panel settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthoringSettings {
    /// Title given to new episodes; `{n}` is replaced by the episode number
    pub default_episode_title: String,
    /// Background given to new episodes
    pub default_background: Option<String>,
    /// Whether the paragraph form refuses blank text
    pub reject_blank_paragraphs: bool,
}

impl Default for AuthoringSettings {
    fn default() -> Self {
        Self {
            default_episode_title: "Episode {n}".to_string(),
            default_background: Some(
                "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=1200&h=800&fit=crop"
                    .to_string(),
            ),
            reject_blank_paragraphs: true,
        }
    }
}

impl AuthoringSettings {
    /// Title for the `number`-th episode (1-based)
    pub fn episode_title(&self, number: usize) -> String {
        self.default_episode_title.replace("{n}", &number.to_string())
    }
}

/// Reading view settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReadingSettings {
    /// Note given to new bookmarks; `{title}` is the episode title and `{n}`
    /// the 1-based paragraph number
    pub bookmark_note: String,
    /// Number of gallery images shown per character in the character list
    pub gallery_preview: usize,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            bookmark_note: "{title} - Paragraph {n}".to_string(),
            gallery_preview: 2,
        }
    }
}

impl ReadingSettings {
    /// Note for a bookmark on paragraph `number` (1-based) of an episode
    pub fn bookmark_note(&self, episode_title: &str, number: usize) -> String {
        self.bookmark_note
            .replace("{title}", episode_title)
            .replace("{n}", &number.to_string())
    }
}

/// Settings manager for loading, saving, and updating reader settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ReaderSettings,
}

impl SettingsManager {
    /// Create a settings manager for the given app data directory
    pub fn new(app_data_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: app_data_dir.as_ref().join("settings.json"),
            current: ReaderSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or use defaults if the file is missing or
    /// cannot be parsed
    pub fn load(&mut self) -> Result<&ReaderSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<ReaderSettings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        path = %self.settings_path.display(),
                        "Failed to parse settings file, using defaults: {}",
                        e
                    );
                    ReaderSettings::default()
                }
            }
        } else {
            ReaderSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &ReaderSettings {
        &self.current
    }

    /// Replace settings and save to disk
    pub fn update(&mut self, settings: ReaderSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }

    /// Reset settings to defaults and save
    pub fn reset(&mut self) -> Result<&ReaderSettings> {
        self.current = ReaderSettings::default();
        self.save()?;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_templates() {
        let settings = ReaderSettings::default();
        assert_eq!(settings.authoring.episode_title(3), "Episode 3");
        assert_eq!(
            settings.reading.bookmark_note("Chapter 1. Arrival", 2),
            "Chapter 1. Arrival - Paragraph 2"
        );
        assert!(settings.authoring.reject_blank_paragraphs);
        assert_eq!(settings.reading.gallery_preview, 2);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: ReaderSettings =
            serde_json::from_str(r#"{"authoring": {"default_episode_title": "Part {n}"}}"#).unwrap();
        assert_eq!(parsed.authoring.episode_title(1), "Part 1");
        assert!(parsed.authoring.reject_blank_paragraphs);
        assert_eq!(parsed.reading, ReadingSettings::default());
    }

    #[test]
    fn test_manager_load_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());

        // Load should return defaults when no file exists
        assert_eq!(manager.load().unwrap(), &ReaderSettings::default());

        let mut settings = ReaderSettings::default();
        settings.reading.gallery_preview = 4;
        manager.update(settings).unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path());
        assert_eq!(manager2.load().unwrap().reading.gallery_preview, 4);

        assert_eq!(manager2.reset().unwrap(), &ReaderSettings::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("settings.json"), "{ nope").unwrap();

        let mut manager = SettingsManager::new(temp_dir.path());
        assert_eq!(manager.load().unwrap(), &ReaderSettings::default());
    }
}
