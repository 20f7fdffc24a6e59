//! Control engine: the phase machine driving one block operation.
//!
//! Encryption is a single pass: load, then one key-schedule step plus one
//! round per step. Decryption is two-phase: the key schedule first runs
//! forward to completion with no rounds, caching the last m round keys;
//! only then does the real pass start, seeded from that cache, with the
//! schedule and the constant sequence both unwinding. Every step reads the
//! pre-step state of all components and commits the new state at once.

use tracing::{debug, trace};

use crate::config::CipherConfig;
use crate::front::{BlockRequest, BlockResponse, Direction};
use crate::round::TextState;
use crate::schedule::{self, KeyWindow, MAX_KEY_WORDS};
use crate::sequence::SequenceGenerator;

/// Engine lifecycle phase. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPhase {
    /// Waiting for a request.
    Idle,
    /// Loading state for an encryption.
    EncPrepare,
    /// Running encryption rounds.
    EncRun,
    /// Loading the key schedule for the decryption warm-up.
    DecKeyPrepare,
    /// Running the forward key schedule to capture the final round keys.
    DecKeyRun,
    /// Loading state for the real decryption pass.
    DecPrepare,
    /// Running decryption rounds.
    DecRun,
    /// Holding the completed response until it is collected.
    Output,
}

/// Rolling capture of the most recently emitted round keys.
///
/// During the decryption warm-up every emitted round key passes through
/// here; after all T steps it holds keys T-m..T-1, the window the real
/// decryption pass starts from.
#[derive(Debug, Clone, Copy, Default)]
struct KeyCache {
    words: [u64; MAX_KEY_WORDS],
    capacity: usize,
    filled: usize,
}

impl KeyCache {
    fn reset(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.filled = 0;
    }

    fn record(&mut self, word: u64) {
        if self.filled < self.capacity {
            self.words[self.filled] = word;
            self.filled += 1;
        } else {
            self.words.copy_within(1..self.capacity, 0);
            self.words[self.capacity - 1] = word;
        }
    }

    /// Captured keys, oldest first.
    fn words(&self) -> &[u64] {
        &self.words[..self.filled]
    }
}

/// Step-wise cipher engine for one fixed configuration.
///
/// All state is owned here and mutated only by [`step`](Self::step) (and
/// the request/response handover). At most one operation is in flight.
#[derive(Debug)]
pub struct ControlEngine {
    config: CipherConfig,
    phase: ControlPhase,
    sequence: SequenceGenerator,
    window: KeyWindow,
    text: TextState,
    key_cache: KeyCache,
    round: usize,
    direction: Direction,
    request_key: [u64; MAX_KEY_WORDS],
    request_text: [u64; 2],
    response_text: [u64; 2],
}

impl ControlEngine {
    /// Creates an idle engine for the given configuration.
    pub fn new(config: CipherConfig) -> Self {
        let sequence = SequenceGenerator::new(config.sequence());
        ControlEngine {
            config,
            phase: ControlPhase::Idle,
            sequence,
            window: KeyWindow::new(),
            text: TextState::default(),
            key_cache: KeyCache::default(),
            round: 0,
            direction: Direction::Encrypt,
            request_key: [0; MAX_KEY_WORDS],
            request_text: [0; 2],
            response_text: [0; 2],
        }
    }

    /// The engine's fixed configuration.
    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ControlPhase {
        self.phase
    }

    /// True in every phase except [`ControlPhase::Idle`].
    pub fn is_active(&self) -> bool {
        self.phase != ControlPhase::Idle
    }

    /// Steps completed in the current running phase.
    pub fn round_counter(&self) -> usize {
        self.round
    }

    /// Latches a request and leaves Idle.
    ///
    /// The caller (normally [`crate::StreamingFront`]) validates the request
    /// first; accepting while active is a caller-contract violation.
    pub(crate) fn accept(&mut self, request: BlockRequest) {
        debug_assert!(!self.is_active(), "accept while an operation is in flight");
        debug_assert_eq!(request.key.len(), self.config.key_words());
        self.direction = request.direction;
        self.request_key[..request.key.len()].copy_from_slice(&request.key);
        self.request_text = request.text;
        match self.direction {
            Direction::Encrypt => self.set_phase(ControlPhase::EncPrepare),
            Direction::Decrypt => self.set_phase(ControlPhase::DecKeyPrepare),
        }
    }

    /// Advances the engine by one logical step.
    ///
    /// In Idle and Output this is a hold: nothing changes until a request
    /// arrives or the pending response is collected.
    pub fn step(&mut self) {
        match self.phase {
            ControlPhase::Idle | ControlPhase::Output => {}
            ControlPhase::EncPrepare => {
                self.text = TextState {
                    x: self.request_text[0],
                    y: self.request_text[1],
                };
                self.load_request_key();
                self.sequence.reset(Direction::Encrypt);
                self.round = 0;
                self.set_phase(ControlPhase::EncRun);
            }
            ControlPhase::EncRun => {
                if self.crypt_step(Direction::Encrypt) {
                    self.response_text = [self.text.x, self.text.y];
                    debug!(direction = ?self.direction, "block complete");
                    self.set_phase(ControlPhase::Output);
                }
            }
            ControlPhase::DecKeyPrepare => {
                self.load_request_key();
                self.sequence.reset(Direction::Encrypt);
                self.key_cache.reset(self.config.key_words());
                self.round = 0;
                self.set_phase(ControlPhase::DecKeyRun);
            }
            ControlPhase::DecKeyRun => {
                // Warm-up: forward schedule only, no rounds. Capture each
                // emitted round key so the tail survives.
                self.key_cache.record(self.window.head());
                let fresh = schedule::next_key_word(
                    &self.window,
                    Direction::Encrypt,
                    self.round_constant(),
                    self.config.word_width(),
                );
                self.window.shift_in(fresh);
                self.sequence.advance();
                self.round += 1;
                if self.round == self.config.round_count() {
                    self.set_phase(ControlPhase::DecPrepare);
                }
            }
            ControlPhase::DecPrepare => {
                // The real pass starts from the cached schedule tail, with
                // the text halves swapped so the encryption round applies.
                self.text = TextState {
                    x: self.request_text[1],
                    y: self.request_text[0],
                };
                self.window.load_reversed(self.key_cache.words());
                self.sequence.reset(Direction::Decrypt);
                self.round = 0;
                self.set_phase(ControlPhase::DecRun);
            }
            ControlPhase::DecRun => {
                if self.crypt_step(Direction::Decrypt) {
                    self.response_text = [self.text.y, self.text.x];
                    debug!(direction = ?self.direction, "block complete");
                    self.set_phase(ControlPhase::Output);
                }
            }
        }
    }

    /// True once the response is latched and waiting.
    pub fn response_ready(&self) -> bool {
        self.phase == ControlPhase::Output
    }

    /// Moves the completed response out, returning the engine to Idle.
    ///
    /// `None` unless a response is ready.
    pub fn take_response(&mut self) -> Option<BlockResponse> {
        if self.phase != ControlPhase::Output {
            return None;
        }
        self.set_phase(ControlPhase::Idle);
        debug!(direction = ?self.direction, "response collected");
        Some(BlockResponse {
            direction: self.direction,
            text: self.response_text,
        })
    }

    fn load_request_key(&mut self) {
        let words = self.config.key_words();
        self.window.load_reversed(&self.request_key[..words]);
    }

    /// Constant for the current step: (2^n - 4) XOR the sequence bit.
    fn round_constant(&self) -> u64 {
        (self.config.word_mask() ^ 0x3) ^ u64::from(self.sequence.output())
    }

    /// One running step: schedule plus round, all reads before all writes.
    /// Returns true when this was the final round.
    fn crypt_step(&mut self, schedule_direction: Direction) -> bool {
        let width = self.config.word_width();
        let round_key = self.window.head();
        let fresh = schedule::next_key_word(
            &self.window,
            schedule_direction,
            self.round_constant(),
            width,
        );
        self.text.advance(round_key, width);
        self.window.shift_in(fresh);
        self.sequence.advance();
        self.round += 1;
        self.round == self.config.round_count()
    }

    fn set_phase(&mut self, next: ControlPhase) {
        trace!(from = ?self.phase, to = ?next, "phase change");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_64_128() -> ControlEngine {
        ControlEngine::new(CipherConfig::new(32, 4).unwrap())
    }

    fn request(direction: Direction, text: [u64; 2]) -> BlockRequest {
        BlockRequest {
            direction,
            key: vec![0x1b1a1918, 0x13121110, 0x0b0a0908, 0x03020100],
            text,
        }
    }

    #[test]
    fn encryption_completes_in_prepare_plus_t_steps() {
        let mut engine = engine_64_128();
        engine.accept(request(Direction::Encrypt, [0x656b696c, 0x20646e75]));
        assert_eq!(engine.phase(), ControlPhase::EncPrepare);
        engine.step();
        assert_eq!(engine.phase(), ControlPhase::EncRun);
        for _ in 0..43 {
            engine.step();
            assert_eq!(engine.phase(), ControlPhase::EncRun);
        }
        engine.step();
        assert_eq!(engine.phase(), ControlPhase::Output);
        let response = engine.take_response().unwrap();
        assert_eq!(response.text, [0x44c8fc20, 0xb9dfa07a]);
        assert_eq!(engine.phase(), ControlPhase::Idle);
    }

    #[test]
    fn decryption_walks_both_passes() {
        let mut engine = engine_64_128();
        engine.accept(request(Direction::Decrypt, [0x44c8fc20, 0xb9dfa07a]));
        assert_eq!(engine.phase(), ControlPhase::DecKeyPrepare);
        engine.step();
        for _ in 0..44 {
            assert_eq!(engine.phase(), ControlPhase::DecKeyRun);
            engine.step();
        }
        assert_eq!(engine.phase(), ControlPhase::DecPrepare);
        engine.step();
        for _ in 0..44 {
            assert_eq!(engine.phase(), ControlPhase::DecRun);
            engine.step();
        }
        assert_eq!(engine.phase(), ControlPhase::Output);
        let response = engine.take_response().unwrap();
        assert_eq!(response.text, [0x656b696c, 0x20646e75]);
    }

    #[test]
    fn round_counter_resets_per_phase_and_increments_per_step() {
        let mut engine = engine_64_128();
        engine.accept(request(Direction::Decrypt, [0x44c8fc20, 0xb9dfa07a]));
        engine.step();
        for expected in 0..44 {
            assert_eq!(engine.round_counter(), expected);
            engine.step();
        }
        // Entering the real pass resets the counter.
        engine.step();
        assert_eq!(engine.round_counter(), 0);
    }

    #[test]
    fn output_holds_the_response_across_idle_steps() {
        let mut engine = engine_64_128();
        engine.accept(request(Direction::Encrypt, [0x656b696c, 0x20646e75]));
        while !engine.response_ready() {
            engine.step();
        }
        for _ in 0..100 {
            engine.step();
            assert_eq!(engine.phase(), ControlPhase::Output);
        }
        let response = engine.take_response().unwrap();
        assert_eq!(response.text, [0x44c8fc20, 0xb9dfa07a]);
    }

    #[test]
    fn take_response_is_none_while_running() {
        let mut engine = engine_64_128();
        assert_eq!(engine.take_response(), None);
        engine.accept(request(Direction::Encrypt, [0, 0]));
        engine.step();
        assert_eq!(engine.take_response(), None);
        assert!(engine.is_active());
    }

    #[test]
    fn idle_steps_are_holds() {
        let mut engine = engine_64_128();
        for _ in 0..10 {
            engine.step();
        }
        assert_eq!(engine.phase(), ControlPhase::Idle);
        assert!(!engine.is_active());
    }

    #[test]
    fn key_cache_keeps_the_last_words() {
        let mut cache = KeyCache::default();
        cache.reset(2);
        for word in 1..=5u64 {
            cache.record(word);
        }
        assert_eq!(cache.words(), &[4, 5]);
    }
}
