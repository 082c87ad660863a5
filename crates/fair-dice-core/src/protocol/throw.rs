//! Fair modulo-N throw.
//!
//! The computer commits to `c` in `0..N`, the user then picks `u` in `0..N`
//! having seen only the proof, and the joint index is `(c + u) mod N`.
//! With `c` uniform and the commitment binding, the index is uniform
//! whatever the user picks.

use crate::console::{ask, parse_below, Console, Menu};
use crate::crypto::{Commitment, EntropySource, Proof, Reveal};
use crate::dice::FACES;
use crate::error::{Flow, ProtocolError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Modulus of a die throw
pub const THROW_MODULUS: u8 = FACES as u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrowPhase {
    AwaitingCommitment,
    AwaitingChoice,
    Resolved,
}

impl ThrowPhase {
    fn as_str(&self) -> &'static str {
        match self {
            ThrowPhase::AwaitingCommitment => "awaiting commitment",
            ThrowPhase::AwaitingChoice => "awaiting choice",
            ThrowPhase::Resolved => "resolved",
        }
    }
}

/// Joint index of two values under `modulus`
pub fn joint_index(committed: u8, counterparty: u8, modulus: u8) -> u8 {
    ((committed as u16 + counterparty as u16) % modulus as u16) as u8
}

/// Everything the throw disclosed, enough to re-verify it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowOutcome {
    pub proof: Proof,
    pub reveal: Reveal,
    pub counterparty_value: u8,
    pub index: u8,
}

#[derive(Debug)]
pub struct FairThrow {
    phase: ThrowPhase,
    commitment: Option<Commitment>,
}

impl Default for FairThrow {
    fn default() -> Self {
        Self::new()
    }
}

impl FairThrow {
    pub fn new() -> Self {
        Self {
            phase: ThrowPhase::AwaitingCommitment,
            commitment: None,
        }
    }

    pub fn phase(&self) -> ThrowPhase {
        self.phase
    }

    /// Commit to a uniform value in `0..THROW_MODULUS`
    pub fn commit<E: EntropySource + ?Sized>(
        &mut self,
        entropy: &mut E,
    ) -> Result<Proof, ProtocolError> {
        self.expect_phase(ThrowPhase::AwaitingCommitment)?;
        self.accept(Commitment::random(entropy, THROW_MODULUS))
    }

    /// Commit to a prepared commitment
    pub fn commit_to(&mut self, commitment: Commitment) -> Result<Proof, ProtocolError> {
        self.expect_phase(ThrowPhase::AwaitingCommitment)?;
        self.accept(commitment)
    }

    /// Combine the counterparty's value with the committed one and reveal.
    ///
    /// A value outside `0..THROW_MODULUS` is rejected without changing phase.
    pub fn submit(&mut self, counterparty_value: u8) -> Result<ThrowOutcome, ProtocolError> {
        self.expect_phase(ThrowPhase::AwaitingChoice)?;
        if counterparty_value >= THROW_MODULUS {
            return Err(ProtocolError::ValueOutOfRange {
                value: counterparty_value,
                modulus: THROW_MODULUS,
            });
        }

        let commitment = self.commitment.take().ok_or(ProtocolError::OutOfOrder {
            expected: ThrowPhase::AwaitingChoice.as_str(),
            actual: "no commitment",
        })?;
        let proof = *commitment.proof();
        let reveal = commitment.reveal();
        self.phase = ThrowPhase::Resolved;

        if reveal.value >= THROW_MODULUS {
            return Err(ProtocolError::ValueOutOfRange {
                value: reveal.value,
                modulus: THROW_MODULUS,
            });
        }
        if !reveal.verify(&proof) {
            error!(%proof, "throw reveal does not match its proof");
            return Err(ProtocolError::VerificationFailed);
        }

        let index = joint_index(reveal.value, counterparty_value, THROW_MODULUS);
        info!(
            committed = reveal.value,
            counterparty_value, index, "throw resolved"
        );
        Ok(ThrowOutcome {
            proof,
            reveal,
            counterparty_value,
            index,
        })
    }

    fn accept(&mut self, commitment: Commitment) -> Result<Proof, ProtocolError> {
        let proof = *commitment.proof();
        self.commitment = Some(commitment);
        self.phase = ThrowPhase::AwaitingChoice;
        debug!(%proof, "throw committed");
        Ok(proof)
    }

    fn expect_phase(&self, expected: ThrowPhase) -> Result<(), ProtocolError> {
        if self.phase != expected {
            return Err(ProtocolError::OutOfOrder {
                expected: expected.as_str(),
                actual: self.phase.as_str(),
            });
        }
        Ok(())
    }
}

/// Play the throw against the user at `console`
pub fn run_throw<C, E>(console: &mut C, entropy: &mut E, help: &str) -> Flow<ThrowOutcome>
where
    C: Console + ?Sized,
    E: EntropySource + ?Sized,
{
    let mut throw = FairThrow::new();
    let proof = throw.commit(entropy)?;
    console.print(&format!(
        "I selected a random value in the range 0..{} (HMAC={}).",
        THROW_MODULUS - 1,
        proof
    ))?;

    let menu = Menu::numbered(
        format!("Add your number modulo {}.", THROW_MODULUS),
        THROW_MODULUS as usize,
    );
    let value = ask(console, &menu, help, |answer| {
        parse_below(answer, THROW_MODULUS as usize).map(|v| v as u8)
    })?;

    let outcome = throw.submit(value)?;
    console.print(&format!(
        "My number is {} (KEY={}).",
        outcome.reveal.value, outcome.reveal.key
    ))?;
    console.print(&format!(
        "The result is {} + {} = {} (mod {}).",
        outcome.reveal.value, outcome.counterparty_value, outcome.index, THROW_MODULUS
    ))?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::crypto::{RngEntropy, ScriptedEntropy, SecretKey};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_committed_three_plus_two_is_five() {
        let mut throw = FairThrow::new();
        throw
            .commit_to(Commitment::with_key(SecretKey::from_bytes([9; 32]), 3))
            .unwrap();
        let outcome = throw.submit(2).unwrap();
        assert_eq!(outcome.index, 5);
        assert_eq!(outcome.reveal.value, 3);
        assert!(outcome.reveal.verify(&outcome.proof));
    }

    #[test]
    fn test_wraps_around() {
        assert_eq!(joint_index(5, 5, 6), 4);
        assert_eq!(joint_index(3, 3, 6), 0);
        assert_eq!(joint_index(0, 0, 6), 0);
    }

    #[test]
    fn test_out_of_range_value_keeps_phase() {
        let mut entropy = ScriptedEntropy::new().with_values([1]);
        let mut throw = FairThrow::new();
        throw.commit(&mut entropy).unwrap();

        assert_eq!(
            throw.submit(7),
            Err(ProtocolError::ValueOutOfRange { value: 7, modulus: 6 })
        );
        assert_eq!(throw.phase(), ThrowPhase::AwaitingChoice);
        assert_eq!(throw.submit(0).unwrap().index, 1);
        assert_eq!(throw.phase(), ThrowPhase::Resolved);
    }

    #[test]
    fn test_submit_before_commit() {
        let mut throw = FairThrow::new();
        assert!(matches!(
            throw.submit(1),
            Err(ProtocolError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_oversized_prepared_commitment_rejected() {
        let mut throw = FairThrow::new();
        throw
            .commit_to(Commitment::with_key(SecretKey::from_bytes([1; 32]), 9))
            .unwrap();
        assert_eq!(
            throw.submit(0),
            Err(ProtocolError::ValueOutOfRange { value: 9, modulus: 6 })
        );
    }

    #[test]
    fn test_run_throw_rejects_seven() {
        let mut entropy = ScriptedEntropy::new().with_values([3]);
        let mut console = ScriptedConsole::new(["7", "2"]);

        let outcome = run_throw(&mut console, &mut entropy, "").unwrap();
        assert_eq!(outcome.index, 5);
        assert_eq!(console.count("Invalid selection"), 1);
        assert_eq!(console.count("Add your number modulo 6."), 2);
        assert!(console.printed("The result is 3 + 2 = 5 (mod 6)."));
    }

    #[test]
    fn test_run_throw_abort_before_reveal() {
        let mut entropy = ScriptedEntropy::new().with_values([3]);
        let mut console = ScriptedConsole::new(["7", "X"]);

        assert!(run_throw(&mut console, &mut entropy, "").unwrap_err().is_abort());
        assert!(!console.printed("My number is"));
    }

    #[test]
    fn test_index_uniform_for_fixed_counterparty() {
        const TRIALS: usize = 6000;
        // chi-square critical value, 5 degrees of freedom, p = 0.0001
        const CRITICAL: f64 = 25.745;

        let mut entropy = RngEntropy::new(StdRng::seed_from_u64(0x5eed));
        for counterparty in 0..THROW_MODULUS {
            let mut counts = [0usize; FACES];
            for _ in 0..TRIALS {
                let committed = entropy.below(THROW_MODULUS);
                counts[joint_index(committed, counterparty, THROW_MODULUS) as usize] += 1;
            }

            let expected = TRIALS as f64 / FACES as f64;
            let chi_square: f64 = counts
                .iter()
                .map(|&c| (c as f64 - expected).powi(2) / expected)
                .sum();
            assert!(
                chi_square < CRITICAL,
                "counterparty {counterparty}: chi-square {chi_square} for {counts:?}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_index_in_range(committed in 0u8..6, counterparty in 0u8..6) {
            let index = joint_index(committed, counterparty, THROW_MODULUS);
            prop_assert!(index < THROW_MODULUS);
        }

        #[test]
        fn prop_each_committed_value_gives_distinct_index(counterparty in 0u8..6) {
            let mut seen: Vec<u8> = (0..THROW_MODULUS)
                .map(|c| joint_index(c, counterparty, THROW_MODULUS))
                .collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..THROW_MODULUS).collect::<Vec<_>>());
        }
    }
}
