//! Block-level request/response surface.
//!
//! The front holds at most one operation in flight. A request is handed
//! over by value, so once accepted it cannot be mutated from outside; the
//! completed response is likewise moved out exactly once. Backpressure is
//! explicit: submitting while busy hands the request straight back.

use tracing::debug;

use crate::engine::ControlEngine;
use crate::error::SimonCoreError;

/// Operation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// One block operation.
///
/// Key words and the text pair are given most significant word first, the
/// order test vectors are printed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRequest {
    /// Operation direction.
    pub direction: Direction,
    /// Key words, most significant first; length must match the engine's
    /// configured key word count.
    pub key: Vec<u64>,
    /// Text block `[x, y]`: plaintext for encryption, ciphertext for
    /// decryption.
    pub text: [u64; 2],
}

/// Result of one completed block operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockResponse {
    /// Direction echoed from the request.
    pub direction: Direction,
    /// Output block `[x, y]`.
    pub text: [u64; 2],
}

/// A request the front refused, handed back together with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRejected {
    /// Why the request was refused.
    pub reason: SimonCoreError,
    /// The untouched request, returned to the caller.
    pub request: BlockRequest,
}

impl std::fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request rejected: {}", self.reason)
    }
}

impl std::error::Error for SubmitRejected {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Single-slot streaming front over the control engine.
///
/// # Examples
///
/// ```
/// use simon_core::{BlockRequest, Direction, StreamingFront};
///
/// let mut front = StreamingFront::new(32, 4).unwrap();
/// let response = front
///     .execute(BlockRequest {
///         direction: Direction::Encrypt,
///         key: vec![0x1b1a1918, 0x13121110, 0x0b0a0908, 0x03020100],
///         text: [0x656b696c, 0x20646e75],
///     })
///     .unwrap();
/// assert_eq!(response.text, [0x44c8fc20, 0xb9dfa07a]);
/// ```
#[derive(Debug)]
pub struct StreamingFront {
    engine: ControlEngine,
}

impl StreamingFront {
    /// Creates a front for the given cipher parameterization.
    ///
    /// # Parameters
    /// - `word_width`: Cipher word width in bits.
    /// - `key_words`: Number of key words.
    ///
    /// # Errors
    /// Fails like [`crate::CipherConfig::new`] for illegal pairs.
    pub fn new(word_width: u32, key_words: usize) -> Result<Self, SimonCoreError> {
        let config = crate::config::CipherConfig::new(word_width, key_words)?;
        Ok(StreamingFront {
            engine: ControlEngine::new(config),
        })
    }

    /// Wraps an already-constructed engine.
    pub fn with_engine(engine: ControlEngine) -> Self {
        StreamingFront { engine }
    }

    /// Read access to the engine, mainly for phase observation.
    pub fn engine(&self) -> &ControlEngine {
        &self.engine
    }

    /// True when a new request would be accepted.
    pub fn is_idle(&self) -> bool {
        !self.engine.is_active()
    }

    /// Offers a request to the engine.
    ///
    /// Accepted only while idle; the request is validated against the
    /// configuration before the engine takes ownership.
    ///
    /// # Errors
    /// Hands the request back inside [`SubmitRejected`] when the engine is
    /// busy, the key length is wrong, or a word exceeds the configured
    /// width.
    pub fn try_submit(&mut self, request: BlockRequest) -> Result<(), SubmitRejected> {
        if self.engine.is_active() {
            return Err(SubmitRejected {
                reason: SimonCoreError::EngineBusy,
                request,
            });
        }
        let config = self.engine.config();
        if request.key.len() != config.key_words() {
            return Err(SubmitRejected {
                reason: SimonCoreError::KeyLengthMismatch {
                    expected: config.key_words(),
                    found: request.key.len(),
                },
                request,
            });
        }
        let mask = config.word_mask();
        let oversized = request.key.iter().any(|&w| w & !mask != 0)
            || request.text.iter().any(|&w| w & !mask != 0);
        if oversized {
            return Err(SubmitRejected {
                reason: SimonCoreError::WordOutOfRange {
                    word_width: config.word_width(),
                },
                request,
            });
        }
        debug!(direction = ?request.direction, "request accepted");
        self.engine.accept(request);
        Ok(())
    }

    /// Advances the engine by one step.
    pub fn step(&mut self) {
        self.engine.step();
    }

    /// True once a completed response is waiting to be collected.
    pub fn response_ready(&self) -> bool {
        self.engine.response_ready()
    }

    /// Collects the completed response, releasing the engine back to idle.
    ///
    /// Returns `None` while no response is ready. Until collected, the
    /// response is held unchanged no matter how many steps elapse.
    pub fn take_response(&mut self) -> Option<BlockResponse> {
        self.engine.take_response()
    }

    /// Submits a request and steps the engine until its response is ready.
    ///
    /// # Errors
    /// Same rejection cases as [`try_submit`](Self::try_submit).
    pub fn execute(&mut self, request: BlockRequest) -> Result<BlockResponse, SubmitRejected> {
        self.try_submit(request)?;
        loop {
            self.engine.step();
            if let Some(response) = self.engine.take_response() {
                return Ok(response);
            }
        }
    }
}
