//! Error types for the simon-core library.

use std::fmt;

/// Errors produced by the simon-core library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimonCoreError {
    /// The (word width, key words) pair is not a published SIMON parameterization.
    UnsupportedConfiguration {
        /// Requested word width in bits.
        word_width: u32,
        /// Requested number of key words.
        key_words: usize,
    },
    /// The pair is published but its sequence seeds are flagged as unverified.
    UnverifiedConfiguration {
        /// Requested word width in bits.
        word_width: u32,
        /// Requested number of key words.
        key_words: usize,
    },
    /// A submitted key does not carry exactly the configured number of words.
    KeyLengthMismatch {
        /// Number of key words the engine was configured for.
        expected: usize,
        /// Number of key words found in the request.
        found: usize,
    },
    /// A submitted key or text word does not fit in the configured word width.
    WordOutOfRange {
        /// Configured word width in bits.
        word_width: u32,
    },
    /// A request was submitted while an operation is still in flight.
    EngineBusy,
    /// Byte input length is not a multiple of the word size in bytes.
    InvalidByteArrayLength {
        /// Word size in bytes for the configured width.
        word_bytes: usize,
        /// Length of the rejected byte slice.
        found: usize,
    },
}

impl fmt::Display for SimonCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimonCoreError::UnsupportedConfiguration {
                word_width,
                key_words,
            } => {
                write!(
                    f,
                    "Simon{}/{} is not a published parameterization",
                    2 * word_width,
                    *key_words as u32 * word_width
                )
            }
            SimonCoreError::UnverifiedConfiguration {
                word_width,
                key_words,
            } => {
                write!(
                    f,
                    "Simon{}/{} sequence seeds are unverified; configuration is disabled",
                    2 * word_width,
                    *key_words as u32 * word_width
                )
            }
            SimonCoreError::KeyLengthMismatch { expected, found } => {
                write!(
                    f,
                    "Key must carry exactly {} words, found {}",
                    expected, found
                )
            }
            SimonCoreError::WordOutOfRange { word_width } => {
                write!(f, "Key and text words must fit in {} bits", word_width)
            }
            SimonCoreError::EngineBusy => {
                write!(f, "Engine already holds an operation in flight")
            }
            SimonCoreError::InvalidByteArrayLength { word_bytes, found } => {
                write!(
                    f,
                    "Byte array length must be a multiple of {}, found {}",
                    word_bytes, found
                )
            }
        }
    }
}

impl std::error::Error for SimonCoreError {}
