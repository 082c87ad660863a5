//! Fair coin flip deciding who claims a die first.
//!
//! The computer commits to a bit and publishes the proof, the user guesses,
//! then the computer reveals. A correct guess gives the user the first move.

use super::types::TurnOrder;
use crate::console::{ask, Console, Menu};
use crate::crypto::{Commitment, EntropySource, Proof, Reveal};
use crate::error::{Flow, ProtocolError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Values a coin can take: `0..COIN_MODULUS`
pub const COIN_MODULUS: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinFlipPhase {
    AwaitingCommitment,
    AwaitingGuess,
    Resolved,
}

impl CoinFlipPhase {
    fn as_str(&self) -> &'static str {
        match self {
            CoinFlipPhase::AwaitingCommitment => "awaiting commitment",
            CoinFlipPhase::AwaitingGuess => "awaiting guess",
            CoinFlipPhase::Resolved => "resolved",
        }
    }
}

/// Everything the coin flip disclosed, enough to re-verify it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinFlipOutcome {
    pub proof: Proof,
    pub reveal: Reveal,
    pub guess: u8,
    pub guessed_right: bool,
}

impl CoinFlipOutcome {
    pub fn turn_order(&self) -> TurnOrder {
        TurnOrder::from_guess(self.guessed_right)
    }
}

#[derive(Debug)]
pub struct CoinFlip {
    phase: CoinFlipPhase,
    commitment: Option<Commitment>,
}

impl Default for CoinFlip {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinFlip {
    pub fn new() -> Self {
        Self {
            phase: CoinFlipPhase::AwaitingCommitment,
            commitment: None,
        }
    }

    pub fn phase(&self) -> CoinFlipPhase {
        self.phase
    }

    /// Commit to a random bit and return the proof to publish
    pub fn commit<E: EntropySource + ?Sized>(
        &mut self,
        entropy: &mut E,
    ) -> Result<Proof, ProtocolError> {
        self.expect_phase(CoinFlipPhase::AwaitingCommitment)?;
        self.accept(Commitment::random(entropy, COIN_MODULUS))
    }

    /// Commit to a known bit. Used when replaying a recorded flip.
    pub fn commit_to(&mut self, commitment: Commitment) -> Result<Proof, ProtocolError> {
        self.expect_phase(CoinFlipPhase::AwaitingCommitment)?;
        self.accept(commitment)
    }

    /// Take the counterparty's guess, reveal, and verify the reveal.
    ///
    /// A guess outside `0..COIN_MODULUS` is rejected without changing phase.
    pub fn resolve(&mut self, guess: u8) -> Result<CoinFlipOutcome, ProtocolError> {
        self.expect_phase(CoinFlipPhase::AwaitingGuess)?;
        if guess >= COIN_MODULUS {
            return Err(ProtocolError::ValueOutOfRange {
                value: guess,
                modulus: COIN_MODULUS,
            });
        }

        let commitment = self.commitment.take().ok_or(ProtocolError::OutOfOrder {
            expected: CoinFlipPhase::AwaitingGuess.as_str(),
            actual: "no commitment",
        })?;
        let proof = *commitment.proof();
        let reveal = commitment.reveal();
        self.phase = CoinFlipPhase::Resolved;

        if !reveal.verify(&proof) {
            error!(%proof, "coin flip reveal does not match its proof");
            return Err(ProtocolError::VerificationFailed);
        }

        let guessed_right = guess == reveal.value;
        info!(value = reveal.value, guess, guessed_right, "coin flip resolved");
        Ok(CoinFlipOutcome {
            proof,
            reveal,
            guess,
            guessed_right,
        })
    }

    fn accept(&mut self, commitment: Commitment) -> Result<Proof, ProtocolError> {
        let proof = *commitment.proof();
        self.commitment = Some(commitment);
        self.phase = CoinFlipPhase::AwaitingGuess;
        debug!(%proof, "coin flip committed");
        Ok(proof)
    }

    fn expect_phase(&self, expected: CoinFlipPhase) -> Result<(), ProtocolError> {
        if self.phase != expected {
            return Err(ProtocolError::OutOfOrder {
                expected: expected.as_str(),
                actual: self.phase.as_str(),
            });
        }
        Ok(())
    }
}

/// Play the coin flip against the user at `console`
pub fn run_coin_flip<C, E>(console: &mut C, entropy: &mut E, help: &str) -> Flow<CoinFlipOutcome>
where
    C: Console + ?Sized,
    E: EntropySource + ?Sized,
{
    let mut flip = CoinFlip::new();
    let proof = flip.commit(entropy)?;
    console.print(&format!(
        "I selected a random value in the range 0..{} (HMAC={}).",
        COIN_MODULUS - 1,
        proof
    ))?;

    let menu = Menu::numbered("Try to guess my selection.", COIN_MODULUS as usize);
    let guess = ask(console, &menu, help, |answer| {
        answer.parse::<u8>().ok().filter(|g| *g < COIN_MODULUS)
    })?;

    let outcome = flip.resolve(guess)?;
    console.print(&format!(
        "My selection: {} (KEY={}).",
        outcome.reveal.value, outcome.reveal.key
    ))?;
    if outcome.guessed_right {
        console.print("You guessed right, you make the first move.")?;
    } else {
        console.print("You guessed wrong, I make the first move.")?;
    }
    Ok(outcome)
}
