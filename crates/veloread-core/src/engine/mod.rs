//! RSVP playback engine: word sequence, position, rate, and the
//! self-renewing tick loop.

use log::debug;

use crate::{
    content::WordSequence,
    observer::StateObserver,
    settings::{ReaderSettings, SettingsPatch},
    snapshot::{StateSnapshot, format_time_remaining},
    timer::TickScheduler,
};

pub const WPM_MIN: u16 = 100;
pub const WPM_MAX: u16 = 1000;

const LONG_WORD_CHARS: usize = 8;
const LONG_WORD_WEIGHT: f32 = 0.2;
const SENTENCE_FALLBACK_WEIGHT: f32 = 0.5;
const CLAUSE_FALLBACK_WEIGHT: f32 = 0.25;

/// Playback engine driving one-word-at-a-time presentation.
///
/// Two states: paused (initial) and playing. While playing exactly one tick
/// is armed on the scheduler; every transition out of playing disarms it
/// before returning, so a stale fire can never corrupt state. All inputs are
/// clamped rather than rejected; no operation fails.
///
/// `&mut self` on every operation enforces the single-context contract: calls
/// are sequential, never re-entrant. Hosts on multiple threads must wrap the
/// engine in a mutex shared with their tick delivery.
pub struct RsvpEngine<S, O>
where
    S: TickScheduler,
    O: StateObserver,
{
    words: WordSequence,
    current_index: usize,
    wpm: u16,
    playing: bool,
    natural_reading: bool,
    sentence_delay: f32,
    clause_delay: f32,
    scheduler: S,
    observer: Option<O>,
}

impl<S, O> RsvpEngine<S, O>
where
    S: TickScheduler,
    O: StateObserver,
{
    pub fn new(scheduler: S, observer: O, settings: ReaderSettings) -> Self {
        Self {
            words: WordSequence::empty(),
            current_index: 0,
            wpm: settings.wpm.clamp(WPM_MIN, WPM_MAX),
            playing: false,
            natural_reading: settings.natural_reading_enabled,
            sentence_delay: settings.sentence_delay,
            clause_delay: settings.clause_delay,
            scheduler,
            observer: Some(observer),
        }
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

include!("controls.rs");
include!("runtime.rs");

#[cfg(test)]
mod tests;
