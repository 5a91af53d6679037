//! Word sequences consumed by the playback engine.

use alloc::{string::String, vec::Vec};

/// Ordered sequence of non-empty tokens, built once per loaded text.
///
/// The sequence is replaced wholesale on reload and never mutated in place.
/// No stored token is empty or whitespace-only.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordSequence {
    words: Vec<String>,
}

impl WordSequence {
    pub const fn empty() -> Self {
        Self { words: Vec::new() }
    }

    /// Tokenize `text` into maximal non-whitespace runs. Line endings of any
    /// flavor count as whitespace, so `\r\n` and `\r` need no separate
    /// normalization pass.
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(String::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }
}
