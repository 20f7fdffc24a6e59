//! Step-accurate engine model of the NSA SIMON block-cipher family.
//!
//! simon-core drives single-block SIMON encryption and decryption one
//! logical step at a time, the way the silicon implementation does:
//! round keys are computed on the fly by a shift-register key schedule, the
//! per-round constant comes from a small reconfigurable LFSR, and
//! decryption first runs the schedule forward to completion (the key
//! warm-up) before the real unwinding pass starts. All nine verified
//! parameterizations of the family are supported, word widths 16 to 64
//! bits with 2 to 4 key words.
//!
//! # Architecture
//!
//! ```text
//! ReconfigurableLfsr  (5-bit register, forward + reverse feedback)
//!     ↓ one constant bit per step
//! SequenceGenerator   (LFSR + period-2 toggle → z-sequence classes 0..4)
//!     ↓
//! KeyWindow + schedule step      TextState + Feistel round
//!     ↘                              ↙
//!      ControlEngine  (Idle / prepare / run / warm-up / Output phases)
//!     ↙
//! StreamingFront      (single-slot request/response with backpressure)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt one Simon64/128 block:
//!
//! ```
//! use simon_core::{BlockRequest, Direction, StreamingFront};
//!
//! let mut front = StreamingFront::new(32, 4).unwrap();
//! let key = vec![0x1b1a1918, 0x13121110, 0x0b0a0908, 0x03020100];
//!
//! let ciphertext = front
//!     .execute(BlockRequest {
//!         direction: Direction::Encrypt,
//!         key: key.clone(),
//!         text: [0x656b696c, 0x20646e75],
//!     })
//!     .unwrap();
//! assert_eq!(ciphertext.text, [0x44c8fc20, 0xb9dfa07a]);
//!
//! let plaintext = front
//!     .execute(BlockRequest {
//!         direction: Direction::Decrypt,
//!         key,
//!         text: ciphertext.text,
//!     })
//!     .unwrap();
//! assert_eq!(plaintext.text, [0x656b696c, 0x20646e75]);
//! ```
//!
//! Stepping manually exposes the engine phases:
//!
//! ```
//! use simon_core::{BlockRequest, ControlPhase, Direction, StreamingFront};
//!
//! let mut front = StreamingFront::new(64, 2).unwrap();
//! front
//!     .try_submit(BlockRequest {
//!         direction: Direction::Encrypt,
//!         key: vec![0x0f0e0d0c0b0a0908, 0x0706050403020100],
//!         text: [0x6373656420737265, 0x6c6c657661727420],
//!     })
//!     .unwrap();
//! assert_eq!(front.engine().phase(), ControlPhase::EncPrepare);
//! while !front.response_ready() {
//!     front.step();
//! }
//! let response = front.take_response().unwrap();
//! assert_eq!(response.text, [0x49681b1e1e54fe3f, 0x65aa832af84e0bbc]);
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod front;
pub mod reference;
pub mod round;
pub mod schedule;
pub mod sequence;
pub mod utils;

pub use config::{CipherConfig, ZClass};
pub use engine::{ControlEngine, ControlPhase};
pub use error::SimonCoreError;
pub use front::{BlockRequest, BlockResponse, Direction, StreamingFront, SubmitRejected};
