//! Cipher parameterization table.
//!
//! Maps the published (word width, key words) pairs of the SIMON family to
//! their round counts and round-constant sequence classes, and derives the
//! per-direction sequence seeds once at construction. Everything downstream
//! of this module treats the resulting [`CipherConfig`] as immutable.

use crate::error::SimonCoreError;
use crate::sequence::SequenceParams;
use crate::utils::bits;

/// Identifier of one of the five official round-constant sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZClass {
    /// Sequence z0 (period 31, no toggle).
    Z0,
    /// Sequence z1 (period 31, no toggle).
    Z1,
    /// Sequence z2 (period 62, toggled).
    Z2,
    /// Sequence z3 (period 62, toggled).
    Z3,
    /// Sequence z4 (period 62, toggled).
    Z4,
}

impl ZClass {
    /// Returns true when the class XORs the period-2 toggle onto the
    /// register output.
    pub fn toggled(self) -> bool {
        matches!(self, ZClass::Z2 | ZClass::Z3 | ZClass::Z4)
    }

    /// Numeric class index (0..=4).
    pub fn index(self) -> usize {
        match self {
            ZClass::Z0 => 0,
            ZClass::Z1 => 1,
            ZClass::Z2 => 2,
            ZClass::Z3 => 3,
            ZClass::Z4 => 4,
        }
    }
}

/// One row of the parameterization table.
struct TableRow {
    word_width: u32,
    key_words: usize,
    round_count: usize,
    z_class: ZClass,
    /// Rows whose sequence seeds are flagged as suspect never construct.
    verified: bool,
}

/// The ten published SIMON parameterizations.
///
/// Simon48/96 is carried for completeness but disabled: its seed constants
/// are annotated as unverified, so construction rejects it rather than
/// trusting the row silently.
const TABLE: [TableRow; 10] = [
    TableRow {
        word_width: 16,
        key_words: 4,
        round_count: 32,
        z_class: ZClass::Z0,
        verified: true,
    },
    TableRow {
        word_width: 24,
        key_words: 3,
        round_count: 36,
        z_class: ZClass::Z0,
        verified: true,
    },
    TableRow {
        word_width: 24,
        key_words: 4,
        round_count: 36,
        z_class: ZClass::Z1,
        verified: false,
    },
    TableRow {
        word_width: 32,
        key_words: 3,
        round_count: 42,
        z_class: ZClass::Z2,
        verified: true,
    },
    TableRow {
        word_width: 32,
        key_words: 4,
        round_count: 44,
        z_class: ZClass::Z3,
        verified: true,
    },
    TableRow {
        word_width: 48,
        key_words: 2,
        round_count: 52,
        z_class: ZClass::Z2,
        verified: true,
    },
    TableRow {
        word_width: 48,
        key_words: 3,
        round_count: 54,
        z_class: ZClass::Z3,
        verified: true,
    },
    TableRow {
        word_width: 64,
        key_words: 2,
        round_count: 68,
        z_class: ZClass::Z2,
        verified: true,
    },
    TableRow {
        word_width: 64,
        key_words: 3,
        round_count: 69,
        z_class: ZClass::Z3,
        verified: true,
    },
    TableRow {
        word_width: 64,
        key_words: 4,
        round_count: 72,
        z_class: ZClass::Z4,
        verified: true,
    },
];

/// Immutable per-engine cipher parameterization.
///
/// Built once from a (word width, key words) pair; construction fails for
/// anything outside the nine legal pairs, so no validity checks are needed
/// at request time.
///
/// # Examples
///
/// ```
/// use simon_core::CipherConfig;
///
/// let config = CipherConfig::new(32, 4).unwrap();
/// assert_eq!(config.round_count(), 44);
///
/// assert!(CipherConfig::new(16, 2).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CipherConfig {
    word_width: u32,
    key_words: usize,
    round_count: usize,
    z_class: ZClass,
    word_mask: u64,
    sequence: SequenceParams,
}

impl CipherConfig {
    /// Looks up a (word width, key words) pair and derives its constants.
    ///
    /// # Parameters
    /// - `word_width`: Cipher word width in bits (16, 24, 32, 48 or 64).
    /// - `key_words`: Number of key words (2, 3 or 4).
    ///
    /// # Errors
    /// Returns [`SimonCoreError::UnsupportedConfiguration`] for a pair the
    /// family does not define, and
    /// [`SimonCoreError::UnverifiedConfiguration`] for Simon48/96, whose
    /// seed constants are flagged as suspect.
    pub fn new(word_width: u32, key_words: usize) -> Result<Self, SimonCoreError> {
        let row = TABLE
            .iter()
            .find(|row| row.word_width == word_width && row.key_words == key_words)
            .ok_or(SimonCoreError::UnsupportedConfiguration {
                word_width,
                key_words,
            })?;
        if !row.verified {
            return Err(SimonCoreError::UnverifiedConfiguration {
                word_width,
                key_words,
            });
        }
        Ok(CipherConfig {
            word_width,
            key_words,
            round_count: row.round_count,
            z_class: row.z_class,
            word_mask: bits::word_mask(word_width),
            sequence: SequenceParams::derive(row.z_class, row.round_count, key_words),
        })
    }

    /// Cipher word width in bits.
    pub fn word_width(&self) -> u32 {
        self.word_width
    }

    /// Number of key words.
    pub fn key_words(&self) -> usize {
        self.key_words
    }

    /// Round count T.
    pub fn round_count(&self) -> usize {
        self.round_count
    }

    /// Round-constant sequence class.
    pub fn z_class(&self) -> ZClass {
        self.z_class
    }

    /// Mask covering one cipher word.
    pub fn word_mask(&self) -> u64 {
        self.word_mask
    }

    /// Derived sequence parameters for this configuration.
    pub(crate) fn sequence(&self) -> &SequenceParams {
        &self.sequence
    }
}
