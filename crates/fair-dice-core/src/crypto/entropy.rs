//! Randomness sources for keys, committed values and autonomous choices.

use super::SecretKey;
use rand::rngs::ThreadRng;
use rand::{CryptoRng, Rng, RngCore};
use std::collections::VecDeque;

/// Source of every random decision the computer makes.
///
/// Implementations:
/// - `RngEntropy` over a cryptographically secure generator for play
/// - `ScriptedEntropy` with queued answers for tests
pub trait EntropySource {
    /// Draw a fresh secret key
    fn secret_key(&mut self) -> SecretKey;

    /// Draw a uniform value in `0..bound`
    fn below(&mut self, bound: u8) -> u8;

    /// Draw a uniform index in `0..len`
    fn pick(&mut self, len: usize) -> usize;
}

/// Entropy backed by a cryptographically secure RNG
#[derive(Debug)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<ThreadRng> {
    /// Entropy from the thread-local ChaCha generator seeded by the OS
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn secret_key(&mut self) -> SecretKey {
        let mut bytes = [0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        SecretKey::from_bytes(bytes)
    }

    fn below(&mut self, bound: u8) -> u8 {
        self.rng.gen_range(0..bound)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Deterministic entropy for tests.
///
/// Queued values and picks are returned in order; once a queue runs dry it
/// answers 0. Keys are `[1; 32]`, `[2; 32]`, ... in draw order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    values: VecDeque<u8>,
    picks: VecDeque<usize>,
    keys_drawn: u8,
}

impl ScriptedEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for `below`
    pub fn with_values(mut self, values: impl IntoIterator<Item = u8>) -> Self {
        self.values.extend(values);
        self
    }

    /// Queue answers for `pick`
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }
}

impl EntropySource for ScriptedEntropy {
    fn secret_key(&mut self) -> SecretKey {
        self.keys_drawn = self.keys_drawn.wrapping_add(1);
        SecretKey::from_bytes([self.keys_drawn; 32])
    }

    fn below(&mut self, bound: u8) -> u8 {
        let value = self.values.pop_front().unwrap_or(0);
        assert!(value < bound, "scripted value {value} is outside 0..{bound}");
        value
    }

    fn pick(&mut self, len: usize) -> usize {
        let index = self.picks.pop_front().unwrap_or(0);
        assert!(index < len, "scripted pick {index} is outside 0..{len}");
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rng_entropy_stays_in_range() {
        let mut entropy = RngEntropy::new(StdRng::seed_from_u64(7));
        for _ in 0..1000 {
            assert!(entropy.below(6) < 6);
            assert!(entropy.pick(3) < 3);
        }
    }

    #[test]
    fn test_rng_entropy_keys_differ() {
        let mut entropy = RngEntropy::thread();
        assert_ne!(entropy.secret_key(), entropy.secret_key());
    }

    #[test]
    fn test_scripted_entropy_replays_queue() {
        let mut entropy = ScriptedEntropy::new()
            .with_values([3, 1])
            .with_picks([2]);

        assert_eq!(entropy.below(6), 3);
        assert_eq!(entropy.below(2), 1);
        assert_eq!(entropy.below(6), 0);
        assert_eq!(entropy.pick(3), 2);
        assert_eq!(entropy.pick(3), 0);
    }

    #[test]
    fn test_scripted_entropy_keys_are_distinct() {
        let mut entropy = ScriptedEntropy::new();
        let first = entropy.secret_key();
        let second = entropy.secret_key();
        assert_ne!(first, second);
        assert_eq!(first, SecretKey::from_bytes([1; 32]));
        assert_eq!(second, SecretKey::from_bytes([2; 32]));
    }

    #[test]
    #[should_panic(expected = "outside 0..2")]
    fn test_scripted_entropy_rejects_out_of_range_script() {
        let mut entropy = ScriptedEntropy::new().with_values([4]);
        entropy.below(2);
    }
}
