impl<S, O> RsvpEngine<S, O>
where
    S: TickScheduler,
    O: StateObserver,
{
    /// Advance one word. Hosts call this when the armed tick fires.
    ///
    /// Reaching the end of the sequence transitions to paused and leaves the
    /// cursor one past the last word, so the final snapshot reports 100%.
    /// Otherwise the updated snapshot is emitted and exactly one next tick is
    /// armed for the new current word. A fire that races a cancel is ignored.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }

        self.current_index += 1;
        if self.current_index >= self.words.len() {
            self.playing = false;
            debug!("playback complete after {} words", self.words.len());
            self.emit_state();
            return;
        }

        self.emit_state();
        self.schedule_current_word();
    }

    /// Fresh snapshot of the current playback state. Pure read.
    pub fn state(&self) -> StateSnapshot<'_> {
        snapshot_of(&self.words, self.current_index, self.wpm, self.playing)
    }

    fn schedule_current_word(&mut self) {
        let Some(word) = self.words.get(self.current_index) else {
            return;
        };
        let delay_ms = self.word_delay_ms(word);
        self.scheduler.schedule(delay_ms);
    }

    /// Display time for one word at the current rate. Long words and
    /// sentence/clause boundaries get extra fixation time; the weights are
    /// additive, so combined effects stay linear rather than compounding.
    fn word_delay_ms(&self, word: &str) -> u64 {
        let base = 60_000.0 / f32::from(self.wpm);
        let mut multiplier = 1.0f32;

        if word.chars().count() > LONG_WORD_CHARS {
            multiplier += LONG_WORD_WEIGHT;
        }
        if word.ends_with(['.', '!', '?']) {
            multiplier += if self.natural_reading {
                self.sentence_delay
            } else {
                SENTENCE_FALLBACK_WEIGHT
            };
        }
        if word.ends_with([',', ';', ':']) {
            multiplier += if self.natural_reading {
                self.clause_delay
            } else {
                CLAUSE_FALLBACK_WEIGHT
            };
        }

        (base * multiplier + 0.5) as u64
    }

    fn emit_state(&mut self) {
        let snapshot = snapshot_of(&self.words, self.current_index, self.wpm, self.playing);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_state_change(&snapshot);
        }
    }
}

fn snapshot_of(words: &WordSequence, index: usize, wpm: u16, playing: bool) -> StateSnapshot<'_> {
    let total = words.len();
    let words_remaining = total.saturating_sub(index);
    let percentage = if total == 0 {
        0
    } else {
        (index as f32 / total as f32 * 100.0 + 0.5) as u8
    };

    StateSnapshot {
        current_word: words.get(index).unwrap_or(""),
        current_index: index,
        total_words: total,
        percentage,
        time_remaining: format_time_remaining(words_remaining, wpm),
        words_remaining,
        is_playing: playing,
    }
}
