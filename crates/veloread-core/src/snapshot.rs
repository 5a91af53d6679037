//! Immutable state snapshots handed to observers.

use core::fmt::Write as _;

/// Formatted estimate such as `"42s"` or `"3m 12s"`. Bounded so producing a
/// snapshot never allocates.
pub type TimeRemaining = heapless::String<16>;

/// Value type emitted on every state-affecting engine operation.
///
/// Produced fresh each time and never mutated after emission. The word text
/// borrows from the engine's sequence for the duration of the synchronous
/// observer call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateSnapshot<'a> {
    /// Word at the current position, `""` at or past the end.
    pub current_word: &'a str,
    pub current_index: usize,
    pub total_words: usize,
    /// Whole-number progress through the sequence, `0`-`100`.
    pub percentage: u8,
    pub time_remaining: TimeRemaining,
    pub words_remaining: usize,
    pub is_playing: bool,
}

/// Estimated reading time left at `wpm`, formatted as seconds below one
/// minute and `"{m}m {s}s"` above (minutes floored, seconds rounded).
pub(crate) fn format_time_remaining(words_remaining: usize, wpm: u16) -> TimeRemaining {
    let seconds = words_remaining as f32 * 60.0 / f32::from(wpm.max(1));
    let mut out = TimeRemaining::new();

    if seconds < 60.0 {
        let _ = write!(out, "{}s", (seconds + 0.5) as u64);
    } else {
        let minutes = (seconds / 60.0) as u64;
        let remainder = seconds - minutes as f32 * 60.0;
        let _ = write!(out, "{minutes}m {}s", (remainder + 0.5) as u64);
    }

    out
}
