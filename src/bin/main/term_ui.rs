//! One-word RSVP frame rendering for the terminal.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use veloread_core::snapshot::StateSnapshot;

const HINTS: &str = "[space] play/pause  [<-/->] skip  [up/down] wpm  [home] restart  [q] quit";

/// Raw-mode/alternate-screen guard; restores the terminal on drop.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub(crate) fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Focus-letter position: none for single chars, then roughly 25-30% into
/// the word.
fn pivot_index(len: usize) -> usize {
    match len {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// Draw one frame: the current word with its focus letter anchored at the
/// horizontal center, plus a status line and key hints at the bottom.
pub(crate) fn draw(
    out: &mut impl Write,
    snapshot: &StateSnapshot<'_>,
    wpm: u16,
) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let word: Vec<char> = snapshot.current_word.chars().collect();
    let pivot = pivot_index(word.len());

    let left: String = word[..pivot.min(word.len())].iter().collect();
    let focus: String = word.get(pivot).into_iter().collect();
    let right: String = word.get(pivot + 1..).unwrap_or(&[]).iter().collect();

    queue!(out, Clear(ClearType::All))?;

    let row = rows / 2;
    let col = (cols / 2).saturating_sub(left.chars().count() as u16);
    queue!(
        out,
        MoveTo(col, row),
        Print(&left),
        SetForegroundColor(Color::Red),
        SetAttribute(Attribute::Bold),
        Print(&focus),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print(&right),
    )?;

    let state = if snapshot.is_playing { "playing" } else { "paused " };
    let status = format!(
        "{state}  {wpm} wpm  {}%  {} left  {}/{}",
        snapshot.percentage,
        snapshot.time_remaining.as_str(),
        snapshot.current_index,
        snapshot.total_words,
    );
    queue!(
        out,
        MoveTo(centered_col(cols, &status), rows.saturating_sub(3)),
        Print(&status),
        MoveTo(centered_col(cols, HINTS), rows.saturating_sub(2)),
        SetAttribute(Attribute::Dim),
        Print(HINTS),
        SetAttribute(Attribute::Reset),
    )?;

    out.flush()
}

fn centered_col(cols: u16, text: &str) -> u16 {
    (cols.saturating_sub(text.chars().count() as u16)) / 2
}
