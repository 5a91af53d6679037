//! Reader configuration and collaborator storage contracts.

use alloc::string::String;

/// Recognized reader options supplied by the host.
///
/// `sentence_delay` and `clause_delay` are the natural-reading multiplier
/// weights added after sentence and clause punctuation. When
/// `natural_reading_enabled` is off the engine falls back to fixed default
/// weights instead of these values; the extra pause never disappears
/// entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReaderSettings {
    pub wpm: u16,
    pub natural_reading_enabled: bool,
    pub sentence_delay: f32,
    pub clause_delay: f32,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            wpm: 300,
            natural_reading_enabled: true,
            sentence_delay: 0.5,
            clause_delay: 0.25,
        }
    }
}

/// Partial settings update applied to a live engine. Absent fields keep
/// their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettingsPatch {
    pub wpm: Option<u16>,
    pub natural_reading_enabled: Option<bool>,
    pub sentence_delay: Option<f32>,
    pub clause_delay: Option<f32>,
}

/// Reading location persisted per document by the host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadingProgress {
    pub document_id: String,
    pub current_word_index: usize,
    pub total_words: usize,
    pub wpm: u16,
    pub last_updated_ms: u64,
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<ReaderSettings>, Self::Error>;
    fn save(&mut self, settings: &ReaderSettings) -> Result<(), Self::Error>;
}

/// Abstract per-document progress backend.
pub trait ProgressStore {
    type Error;

    fn load(&mut self, document_id: &str) -> Result<Option<ReadingProgress>, Self::Error>;
    fn save(&mut self, progress: &ReadingProgress) -> Result<(), Self::Error>;
}
