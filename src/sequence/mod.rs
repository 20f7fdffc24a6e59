//! Round-constant sequence subsystem.
//!
//! Hosts the reconfigurable LFSR and the z-sequence generator built on top
//! of it. The generator feeds one constant bit per round into the key
//! schedule, in forward order for encryption and reverse order for the
//! decryption pass.

pub mod generator;
pub mod lfsr;

pub use generator::{SequenceGenerator, SequenceParams};
pub use lfsr::{FeedbackMatrix, ReconfigurableLfsr};
