//! Byte-to-word conversion utilities.
//!
//! Converts between byte arrays and cipher words using little-endian byte
//! ordering, matching the packing used by the published SIMON reference
//! code. Words are `word_width / 8` bytes wide, so a 24-bit configuration
//! consumes three bytes per word.

use crate::error::SimonCoreError;
use crate::utils::bits;

/// Converts a byte slice to cipher words using little-endian byte ordering.
///
/// The first byte of each group lands in the least significant position, so
/// `words[0]` is the least significant word of the input.
///
/// # Parameters
/// - `input`: Byte slice whose length must be a multiple of `word_width / 8`.
/// - `word_width`: Word width in bits (must be a multiple of 8).
///
/// # Returns
/// A `Vec<u64>` containing `input.len() / (word_width / 8)` words.
///
/// # Errors
/// Returns [`SimonCoreError::InvalidByteArrayLength`] if the input length is
/// not a multiple of the word size in bytes.
pub fn bytes_to_words(input: &[u8], word_width: u32) -> Result<Vec<u64>, SimonCoreError> {
    let word_bytes = (word_width / 8) as usize;
    if !input.len().is_multiple_of(word_bytes) {
        return Err(SimonCoreError::InvalidByteArrayLength {
            word_bytes,
            found: input.len(),
        });
    }
    let mut words = Vec::with_capacity(input.len() / word_bytes);
    for chunk in input.chunks_exact(word_bytes) {
        let mut value: u64 = 0;
        for (i, &byte) in chunk.iter().enumerate() {
            value |= (byte as u64) << (8 * i);
        }
        words.push(value);
    }
    Ok(words)
}

/// Converts cipher words to bytes using little-endian byte ordering.
///
/// Inverse of [`bytes_to_words`]: each word is emitted least significant
/// byte first, `word_width / 8` bytes per word.
///
/// # Parameters
/// - `words`: Words to serialize (each must fit in `word_width` bits).
/// - `word_width`: Word width in bits (must be a multiple of 8).
///
/// # Returns
/// A `Vec<u8>` containing `words.len() * (word_width / 8)` bytes.
pub fn words_to_bytes(words: &[u64], word_width: u32) -> Vec<u8> {
    let word_bytes = (word_width / 8) as usize;
    let mut output = Vec::with_capacity(words.len() * word_bytes);
    for &word in words {
        debug_assert_eq!(word & !bits::word_mask(word_width), 0);
        for i in 0..word_bytes {
            output.push((word >> (8 * i)) as u8);
        }
    }
    output
}
