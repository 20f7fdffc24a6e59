//! Contract tests for the request/response lifecycle.
//!
//! Pins the externally observable guarantees: requests are only accepted
//! while idle, the activity flag tracks the phase machine, the round
//! counter is strictly monotonic within a running phase, and a completed
//! response stays frozen until collected.

use simon_core::{
    BlockRequest, ControlPhase, Direction, SimonCoreError, StreamingFront,
};

fn simon64_128() -> StreamingFront {
    StreamingFront::new(32, 4).unwrap()
}

fn encrypt_request() -> BlockRequest {
    BlockRequest {
        direction: Direction::Encrypt,
        key: vec![0x1b1a1918, 0x13121110, 0x0b0a0908, 0x03020100],
        text: [0x656b696c, 0x20646e75],
    }
}

fn decrypt_request() -> BlockRequest {
    BlockRequest {
        direction: Direction::Decrypt,
        key: vec![0x1b1a1918, 0x13121110, 0x0b0a0908, 0x03020100],
        text: [0x44c8fc20, 0xb9dfa07a],
    }
}

#[test]
fn requests_are_rejected_through_the_whole_lifecycle() {
    let mut front = simon64_128();
    front.try_submit(decrypt_request()).unwrap();
    // Busy from acceptance until the response is taken, across every phase.
    let mut guard = 0;
    while !front.response_ready() {
        let rejected = front.try_submit(encrypt_request()).unwrap_err();
        assert_eq!(rejected.reason, SimonCoreError::EngineBusy);
        front.step();
        guard += 1;
        assert!(guard < 1000, "decryption never completed");
    }
    let rejected = front.try_submit(encrypt_request()).unwrap_err();
    assert_eq!(rejected.reason, SimonCoreError::EngineBusy);
    front.take_response().unwrap();
    // Idle again: the next request goes through.
    front.try_submit(encrypt_request()).unwrap();
}

#[test]
fn activity_flag_is_false_only_in_idle() {
    let mut front = simon64_128();
    assert!(front.is_idle());
    assert_eq!(front.engine().phase(), ControlPhase::Idle);
    front.try_submit(encrypt_request()).unwrap();
    while !front.response_ready() {
        assert!(!front.is_idle());
        front.step();
    }
    assert!(!front.is_idle());
    front.take_response().unwrap();
    assert!(front.is_idle());
}

#[test]
fn decrypt_phase_order_is_warmup_then_real_pass() {
    let mut front = simon64_128();
    front.try_submit(decrypt_request()).unwrap();
    let mut phases = vec![front.engine().phase()];
    while !front.response_ready() {
        front.step();
        let phase = front.engine().phase();
        if *phases.last().unwrap() != phase {
            phases.push(phase);
        }
    }
    assert_eq!(
        phases,
        vec![
            ControlPhase::DecKeyPrepare,
            ControlPhase::DecKeyRun,
            ControlPhase::DecPrepare,
            ControlPhase::DecRun,
            ControlPhase::Output,
        ]
    );
}

#[test]
fn encrypt_phase_order_is_single_pass() {
    let mut front = simon64_128();
    front.try_submit(encrypt_request()).unwrap();
    let mut phases = vec![front.engine().phase()];
    while !front.response_ready() {
        front.step();
        let phase = front.engine().phase();
        if *phases.last().unwrap() != phase {
            phases.push(phase);
        }
    }
    assert_eq!(
        phases,
        vec![
            ControlPhase::EncPrepare,
            ControlPhase::EncRun,
            ControlPhase::Output,
        ]
    );
}

#[test]
fn round_counter_is_strictly_monotonic_within_a_run() {
    let mut front = simon64_128();
    front.try_submit(encrypt_request()).unwrap();
    front.step();
    let mut previous = front.engine().round_counter();
    assert_eq!(previous, 0);
    while front.engine().phase() == ControlPhase::EncRun {
        front.step();
        let current = front.engine().round_counter();
        assert_eq!(current, previous + 1);
        previous = current;
    }
    assert_eq!(previous, front.engine().config().round_count());
}

#[test]
fn response_is_stable_under_extra_steps() {
    let mut front = simon64_128();
    front.try_submit(encrypt_request()).unwrap();
    while !front.response_ready() {
        front.step();
    }
    for _ in 0..500 {
        front.step();
        assert!(front.response_ready());
    }
    let response = front.take_response().unwrap();
    assert_eq!(response.text, [0x44c8fc20, 0xb9dfa07a]);
    assert_eq!(response.direction, Direction::Encrypt);
    assert!(front.take_response().is_none());
}

#[test]
fn back_to_back_operations_reuse_the_engine_cleanly() {
    let mut front = simon64_128();
    // Encrypt, decrypt, encrypt again: state from one operation must not
    // leak into the next.
    let first = front.execute(encrypt_request()).unwrap();
    let restored = front.execute(decrypt_request()).unwrap();
    assert_eq!(restored.text, [0x656b696c, 0x20646e75]);
    let second = front.execute(encrypt_request()).unwrap();
    assert_eq!(first.text, second.text);
}

#[test]
fn direction_is_echoed_in_the_response() {
    let mut front = simon64_128();
    let response = front.execute(decrypt_request()).unwrap();
    assert_eq!(response.direction, Direction::Decrypt);
}
