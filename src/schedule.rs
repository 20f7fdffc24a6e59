//! Key schedule window and step recurrence.
//!
//! The key state is a window of m words behaving as a shift register: each
//! step drops the oldest word (the round key in use) and appends one fresh
//! word computed from the recurrence. The recurrence reads different window
//! positions for m = 2, 3 and 4, and decryption mirrors the source indices
//! so the same window mechanics unwind the schedule.

use crate::front::Direction;
use crate::utils::bits;

/// Maximum number of key words across all configurations.
pub const MAX_KEY_WORDS: usize = 4;

/// Shift-register window over the most recent m key words.
///
/// `word(0)` is the oldest word and doubles as the current round key.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyWindow {
    words: [u64; MAX_KEY_WORDS],
    len: usize,
}

impl KeyWindow {
    /// Creates an empty window; a load fills it before any stepping.
    pub fn new() -> Self {
        KeyWindow::default()
    }

    /// Loads the window from a slice, reversing the order.
    ///
    /// Key material arrives most-significant word first, while the window
    /// wants the word consumed first at index 0, so loading reverses.
    ///
    /// # Parameters
    /// - `words`: Source words, at most [`MAX_KEY_WORDS`] of them.
    pub fn load_reversed(&mut self, words: &[u64]) {
        debug_assert!((2..=MAX_KEY_WORDS).contains(&words.len()));
        self.len = words.len();
        for (i, &word) in words.iter().rev().enumerate() {
            self.words[i] = word;
        }
    }

    /// Number of words held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True before the first load.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the word at `index` (0 = oldest).
    pub fn word(&self, index: usize) -> u64 {
        debug_assert!(index < self.len);
        self.words[index]
    }

    /// The oldest word: the round key for the current step.
    pub fn head(&self) -> u64 {
        self.word(0)
    }

    /// Drops the oldest word, shifts the rest down and appends `word`.
    pub fn shift_in(&mut self, word: u64) {
        self.words.copy_within(1..self.len, 0);
        self.words[self.len - 1] = word;
    }
}

/// Computes the fresh trailing word for one key schedule step.
///
/// The round constant is `(2^n - 4) XOR z` with z the sequence bit for this
/// step; the caller composes it so this stays a pure window-to-word map.
///
/// # Parameters
/// - `window`: Current key window (pre-step state).
/// - `direction`: Selects the forward or the unwinding recurrence.
/// - `round_constant`: Composed constant for this step.
/// - `word_width`: Cipher word width in bits.
///
/// # Returns
/// The word to shift into the window.
pub fn next_key_word(
    window: &KeyWindow,
    direction: Direction,
    round_constant: u64,
    word_width: u32,
) -> u64 {
    let decrypt = direction == Direction::Decrypt;
    let t = match window.len() {
        2 => bits::rotate_right(window.word(1), 3, word_width),
        3 => {
            let src = if decrypt { window.word(1) } else { window.word(2) };
            bits::rotate_right(src, 3, word_width)
        }
        4 => {
            let rot_src = if decrypt { window.word(1) } else { window.word(3) };
            let xor_src = if decrypt { window.word(3) } else { window.word(1) };
            bits::rotate_right(rot_src, 3, word_width) ^ xor_src
        }
        len => unreachable!("key window holds {} words", len),
    };
    t ^ window.head() ^ bits::rotate_right(t, 1, word_width) ^ round_constant
}
