// Integration tests for tidstreneren
// This file serves as the main entry point for integration tests

mod common;

#[path = "integration/ring_drag.rs"]
mod ring_drag;

#[path = "integration/countdown.rs"]
mod countdown;

#[path = "integration/routines_persistence.rs"]
mod routines_persistence;

#[path = "integration/config_state.rs"]
mod config_state;

#[path = "integration/speech_chain.rs"]
mod speech_chain;
