impl<S, O> RsvpEngine<S, O>
where
    S: TickScheduler,
    O: StateObserver,
{
    /// Replace the word sequence wholesale and reset position to the start.
    /// Cancels any running playback; never auto-starts.
    pub fn load_content(&mut self, text: &str) {
        self.scheduler.cancel();
        self.playing = false;
        self.words = WordSequence::from_text(text);
        self.current_index = 0;
        debug!("loaded {} words", self.words.len());
        self.emit_state();
    }

    /// Start playback at the current position. No-op when already playing or
    /// when the sequence is empty; a position at or past the end wraps to the
    /// first word before starting.
    pub fn play(&mut self) {
        if self.playing || self.words.is_empty() {
            return;
        }
        if self.current_index >= self.words.len() {
            self.current_index = 0;
        }

        self.playing = true;
        self.schedule_current_word();
        debug!("playing from word {}", self.current_index);
        self.emit_state();
    }

    /// Suspend playback, disarming the pending tick. Idempotent.
    pub fn pause(&mut self) {
        self.scheduler.cancel();
        self.playing = false;
        self.emit_state();
    }

    /// Pause and rewind to the first word. Total over any prior state,
    /// including a freshly loaded engine.
    pub fn stop(&mut self) {
        self.scheduler.cancel();
        self.playing = false;
        self.current_index = 0;
        self.emit_state();
    }

    /// Move forward `count` words, clamped to the last word.
    pub fn skip(&mut self, count: usize) {
        self.jump_to(self.current_index.saturating_add(count));
    }

    /// Move back `count` words, clamped to the first word.
    pub fn rewind(&mut self, count: usize) {
        self.jump_to(self.current_index.saturating_sub(count));
    }

    /// Clamp `index` to the valid range and move there. Playing state is
    /// unchanged; while playing, the armed tick is replaced with one computed
    /// from the word now at the cursor so the old word's delay never governs
    /// the jump target.
    pub fn jump_to(&mut self, index: usize) {
        self.current_index = index.min(self.words.len().saturating_sub(1));
        if self.playing {
            self.scheduler.cancel();
            self.schedule_current_word();
        }
        self.emit_state();
    }

    /// Clamp to `[WPM_MIN, WPM_MAX]` and store. An already armed tick keeps
    /// its old delay; the new rate applies from the next scheduling on.
    pub fn set_wpm(&mut self, wpm: u16) {
        self.wpm = wpm.clamp(WPM_MIN, WPM_MAX);
    }

    /// Apply the present fields of `patch` to the live engine.
    pub fn apply_settings(&mut self, patch: SettingsPatch) {
        if let Some(wpm) = patch.wpm {
            self.set_wpm(wpm);
        }
        if let Some(enabled) = patch.natural_reading_enabled {
            self.natural_reading = enabled;
        }
        if let Some(weight) = patch.sentence_delay {
            self.sentence_delay = weight;
        }
        if let Some(weight) = patch.clause_delay {
            self.clause_delay = weight;
        }
    }

    /// Disarm any pending tick and drop the observer. Safe to call
    /// repeatedly; operations after teardown emit nothing.
    pub fn destroy(&mut self) {
        self.scheduler.cancel();
        self.playing = false;
        self.observer = None;
    }
}
