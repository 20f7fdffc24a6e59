//! Straight-line reference cipher.
//!
//! An independent SIMON implementation in the classic software shape:
//! expand the whole round-key array up front, then iterate the round
//! function over it. The engine never calls into this module; it exists so
//! tests and benches can compare the step-wise machine against a golden
//! model that shares no state or constants with it. The packed z-sequence
//! literals below are carried as constants rather than generated, matching
//! the published reference code.

use crate::config::CipherConfig;
use crate::error::SimonCoreError;
use crate::front::Direction;
use crate::round::mix;
use crate::utils::{bits, converter};

/// The five official z-sequences, bit i of each at position `i % 62`.
const Z_PACKED: [u64; 5] = [
    0x19C3522FB386A45F,
    0x16864FB8AD0C9F71,
    0x7369F885192C0EF5,
    0xFC2CE51207A635DB,
    0xFDC94C3A046D678B,
];

/// Reads sequence bit `index` for the given class.
fn z_bit(class: usize, index: usize) -> u64 {
    (Z_PACKED[class] >> (index % 62)) & 1
}

/// Expands the full round-key array for a configuration.
///
/// # Parameters
/// - `config`: Cipher configuration.
/// - `key`: Key words, most significant first (`config.key_words()` of them).
///
/// # Returns
/// All `config.round_count()` round keys, round 0 first.
pub fn key_schedule(config: &CipherConfig, key: &[u64]) -> Vec<u64> {
    let m = config.key_words();
    let t = config.round_count();
    let width = config.word_width();
    let class = config.z_class().index();
    debug_assert_eq!(key.len(), m);

    let c = config.word_mask() ^ 0x3;
    let mut rk: Vec<u64> = Vec::with_capacity(t);
    rk.extend(key.iter().rev());
    for i in m..t {
        let z = z_bit(class, i - m);
        let mut word = c ^ z ^ rk[i - m] ^ bits::rotate_right(rk[i - 1], 3, width);
        word ^= bits::rotate_right(rk[i - 1], 4, width);
        if m == 4 {
            word ^= rk[i - 3] ^ bits::rotate_right(rk[i - 3], 1, width);
        }
        rk.push(word);
    }
    rk
}

/// Encrypts one block.
///
/// # Parameters
/// - `config`: Cipher configuration.
/// - `key`: Key words, most significant first.
/// - `text`: Plaintext block `[x, y]`, most significant word first.
///
/// # Returns
/// Ciphertext block `[x, y]`.
pub fn encrypt_block(config: &CipherConfig, key: &[u64], text: [u64; 2]) -> [u64; 2] {
    let width = config.word_width();
    let rk = key_schedule(config, key);
    let (mut x, mut y) = (text[0], text[1]);
    for &round_key in &rk {
        let next_x = y ^ mix(x, width) ^ round_key;
        y = x;
        x = next_x;
    }
    [x, y]
}

/// Decrypts one block.
///
/// # Parameters
/// - `config`: Cipher configuration.
/// - `key`: Key words, most significant first.
/// - `text`: Ciphertext block `[x, y]`, most significant word first.
///
/// # Returns
/// Plaintext block `[x, y]`.
pub fn decrypt_block(config: &CipherConfig, key: &[u64], text: [u64; 2]) -> [u64; 2] {
    let width = config.word_width();
    let rk = key_schedule(config, key);
    let (mut x, mut y) = (text[0], text[1]);
    for &round_key in rk.iter().rev() {
        let prev_y = x ^ mix(y, width) ^ round_key;
        x = y;
        y = prev_y;
    }
    [x, y]
}

/// Byte-level entry point mirroring the classic testbench glue: unpack
/// little-endian bytes to words, run the cipher, repack.
///
/// # Parameters
/// - `config`: Cipher configuration.
/// - `direction`: Encrypt or decrypt.
/// - `key`: `key_words * word_width / 8` key bytes, little endian.
/// - `text`: One block of `2 * word_width / 8` bytes, little endian.
///
/// # Errors
/// Returns [`SimonCoreError::InvalidByteArrayLength`] if either slice does
/// not divide into whole words or the text is not exactly one block, and
/// [`SimonCoreError::KeyLengthMismatch`] if the key does not unpack to the
/// configured word count.
pub fn run_bytes(
    config: &CipherConfig,
    direction: Direction,
    key: &[u8],
    text: &[u8],
) -> Result<Vec<u8>, SimonCoreError> {
    let width = config.word_width();
    // Little-endian unpacking yields least significant word first; the
    // word-level API wants most significant first.
    let mut key_words = converter::bytes_to_words(key, width)?;
    key_words.reverse();
    if key_words.len() != config.key_words() {
        return Err(SimonCoreError::KeyLengthMismatch {
            expected: config.key_words(),
            found: key_words.len(),
        });
    }
    let text_words = converter::bytes_to_words(text, width)?;
    if text_words.len() != 2 {
        return Err(SimonCoreError::InvalidByteArrayLength {
            word_bytes: (width / 8) as usize,
            found: text.len(),
        });
    }
    let block = [text_words[1], text_words[0]];
    let out = match direction {
        Direction::Encrypt => encrypt_block(config, &key_words, block),
        Direction::Decrypt => decrypt_block(config, &key_words, block),
    };
    Ok(converter::words_to_bytes(&[out[1], out[0]], width))
}
