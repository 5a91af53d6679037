//! JSON-file settings and progress stores under the user config directory.

use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use veloread_core::settings::{ProgressStore, ReaderSettings, ReadingProgress, SettingsStore};

const APP_DIR: &str = "veloread";
const SETTINGS_FILE: &str = "settings.json";
const PROGRESS_FILE: &str = "progress.json";

fn data_path(file: &str) -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow!("no user config directory"))?;
    let dir = base.join(APP_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir.join(file))
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
struct StoredSettings {
    wpm: u16,
    natural_reading_enabled: bool,
    sentence_delay: f32,
    clause_delay: f32,
}

impl Default for StoredSettings {
    fn default() -> Self {
        ReaderSettings::default().into()
    }
}

impl From<ReaderSettings> for StoredSettings {
    fn from(settings: ReaderSettings) -> Self {
        Self {
            wpm: settings.wpm,
            natural_reading_enabled: settings.natural_reading_enabled,
            sentence_delay: settings.sentence_delay,
            clause_delay: settings.clause_delay,
        }
    }
}

impl From<StoredSettings> for ReaderSettings {
    fn from(stored: StoredSettings) -> Self {
        Self {
            wpm: stored.wpm,
            natural_reading_enabled: stored.natural_reading_enabled,
            sentence_delay: stored.sentence_delay,
            clause_delay: stored.clause_delay,
        }
    }
}

/// Reader settings persisted as a single JSON document.
pub(crate) struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub(crate) fn open() -> Result<Self> {
        Ok(Self {
            path: data_path(SETTINGS_FILE)?,
        })
    }
}

impl SettingsStore for SettingsFile {
    type Error = anyhow::Error;

    fn load(&mut self) -> Result<Option<ReaderSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let stored: StoredSettings = serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(stored.into()))
    }

    fn save(&mut self, settings: &ReaderSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(&StoredSettings::from(*settings))?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct StoredProgress {
    current_word_index: usize,
    total_words: usize,
    wpm: u16,
    last_updated_ms: u64,
}

/// Per-document reading positions, keyed by document id in one JSON map.
pub(crate) struct ProgressFile {
    path: PathBuf,
}

impl ProgressFile {
    pub(crate) fn open() -> Result<Self> {
        Ok(Self {
            path: data_path(PROGRESS_FILE)?,
        })
    }

    fn read_all(&self) -> Result<HashMap<String, StoredProgress>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("parsing {}", self.path.display()))
    }

    fn write_all(&self, all: &HashMap<String, StoredProgress>) -> Result<()> {
        let json = serde_json::to_string_pretty(all)?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))
    }
}

impl ProgressStore for ProgressFile {
    type Error = anyhow::Error;

    fn load(&mut self, document_id: &str) -> Result<Option<ReadingProgress>> {
        let mut all = self.read_all()?;
        Ok(all.remove(document_id).map(|stored| ReadingProgress {
            document_id: document_id.to_owned(),
            current_word_index: stored.current_word_index,
            total_words: stored.total_words,
            wpm: stored.wpm,
            last_updated_ms: stored.last_updated_ms,
        }))
    }

    fn save(&mut self, progress: &ReadingProgress) -> Result<()> {
        // A corrupt map should not block saving; start over like a fresh file.
        let mut all = self.read_all().unwrap_or_else(|err| {
            warn!("resetting progress file: {err:#}");
            HashMap::new()
        });
        all.insert(
            progress.document_id.clone(),
            StoredProgress {
                current_word_index: progress.current_word_index,
                total_words: progress.total_words,
                wpm: progress.wpm,
                last_updated_ms: progress.last_updated_ms,
            },
        );
        self.write_all(&all)
    }
}
