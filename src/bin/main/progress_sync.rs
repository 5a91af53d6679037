//! Debounced persistence of the reading position.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::warn;
use veloread_core::settings::{ProgressStore, ReadingProgress};

use crate::store::ProgressFile;

type Position = (usize, usize, u16); // (word index, total words, wpm)

/// Tracks the latest playback position and writes it out at a fixed cadence,
/// so a tick-per-word playback does not turn into a write per word.
pub(crate) struct ProgressSyncState {
    document_id: String,
    interval_ms: u64,
    started: Instant,
    last_saved: Option<Position>,
    pending: Option<(Position, u64)>,
}

impl ProgressSyncState {
    pub(crate) fn new(document_id: String, interval_ms: u64) -> Self {
        Self {
            document_id,
            interval_ms,
            started: Instant::now(),
            last_saved: None,
            pending: None,
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Record the latest position. Positions at the first word are not worth
    /// persisting; restore skips them anyway.
    pub(crate) fn track(&mut self, (index, total): (usize, usize), wpm: u16) {
        if index == 0 {
            self.pending = None;
            return;
        }

        let current = (index, total, wpm);
        if self.last_saved == Some(current) {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            // Keep the original timestamp so the save cadence holds while the
            // position keeps moving.
            Some((value, _)) => *value = current,
            None => self.pending = Some((current, self.now_ms())),
        }
    }

    pub(crate) fn flush_if_due(&mut self, store: &mut ProgressFile) {
        let Some((value, since_ms)) = self.pending else {
            return;
        };
        if self.now_ms().saturating_sub(since_ms) < self.interval_ms {
            return;
        }
        self.save(store, value);
    }

    /// Unconditional save of the given position, used on shutdown.
    pub(crate) fn flush_now(&mut self, store: &mut ProgressFile, position: (usize, usize), wpm: u16) {
        let (index, total) = position;
        if index == 0 {
            return;
        }
        self.save(store, (index, total, wpm));
    }

    fn save(&mut self, store: &mut ProgressFile, value: Position) {
        let (index, total, wpm) = value;
        let record = ReadingProgress {
            document_id: self.document_id.clone(),
            current_word_index: index,
            total_words: total,
            wpm,
            last_updated_ms: unix_ms(),
        };

        match store.save(&record) {
            Ok(()) => {
                self.last_saved = Some(value);
                self.pending = None;
            }
            Err(err) => {
                warn!("failed to save progress: {err:#}");
                // Retry on the next cadence boundary.
                self.pending = Some((value, self.now_ms()));
            }
        }
    }
}

fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
