//! Cryptographic primitives for the fair dice game.
//!
//! This module provides:
//! - SecretKey, Proof and Commitment for the keyed-hash commit-reveal scheme
//! - EntropySource for every random decision the computer makes

mod commitment;
mod entropy;

pub use commitment::{verify, verify_hex, Commitment, Proof, Reveal, SecretKey};
pub use entropy::{EntropySource, RngEntropy, ScriptedEntropy};
