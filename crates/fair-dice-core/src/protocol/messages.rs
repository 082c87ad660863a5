//! Round transcript disclosed after play, for independent verification.

use super::coin_flip::{CoinFlipOutcome, COIN_MODULUS};
use super::round::{resolve_round, RoundResult};
use super::selection::ClaimedDice;
use super::throw::{joint_index, ThrowOutcome, THROW_MODULUS};
use super::types::GameId;
use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// Every commitment, reveal and choice of one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTranscript {
    pub game_id: GameId,
    pub coin_flip: CoinFlipOutcome,
    pub dice: ClaimedDice,
    pub throw: ThrowOutcome,
    pub round: RoundResult,
}

impl RoundTranscript {
    /// Recompute both proofs and every derived value
    pub fn verify(&self) -> Result<(), ProtocolError> {
        let flip = &self.coin_flip;
        if flip.reveal.value >= COIN_MODULUS || !flip.reveal.verify(&flip.proof) {
            return Err(ProtocolError::VerificationFailed);
        }
        if flip.guessed_right != (flip.guess == flip.reveal.value) {
            return Err(ProtocolError::VerificationFailed);
        }

        let throw = &self.throw;
        if throw.reveal.value >= THROW_MODULUS || !throw.reveal.verify(&throw.proof) {
            return Err(ProtocolError::VerificationFailed);
        }
        if throw.counterparty_value >= THROW_MODULUS
            || throw.index != joint_index(throw.reveal.value, throw.counterparty_value, THROW_MODULUS)
        {
            return Err(ProtocolError::VerificationFailed);
        }

        if resolve_round(throw.index, &self.dice.computer, &self.dice.user) != self.round {
            return Err(ProtocolError::VerificationFailed);
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Commitment, SecretKey};
    use crate::dice::Die;
    use crate::protocol::{CoinFlip, FairThrow};

    fn transcript() -> RoundTranscript {
        let mut flip = CoinFlip::new();
        flip.commit_to(Commitment::with_key(SecretKey::from_bytes([1; 32]), 1))
            .unwrap();
        let coin_flip = flip.resolve(1).unwrap();

        let mut throw = FairThrow::new();
        throw
            .commit_to(Commitment::with_key(SecretKey::from_bytes([2; 32]), 3))
            .unwrap();
        let throw = throw.submit(2).unwrap();

        let dice = ClaimedDice {
            computer: Die::new([6, 8, 1, 1, 8, 6]),
            user: Die::new([2, 2, 4, 4, 9, 9]),
        };
        let round = resolve_round(throw.index, &dice.computer, &dice.user);
        RoundTranscript {
            game_id: GameId::new(),
            coin_flip,
            dice,
            throw,
            round,
        }
    }

    #[test]
    fn test_honest_transcript_verifies() {
        assert_eq!(transcript().verify(), Ok(()));
    }

    #[test]
    fn test_json_keeps_verifiability() {
        let original = transcript();
        let json = original.to_json().unwrap();
        assert!(json.contains("\"proof\""));

        let parsed = RoundTranscript::from_json(&json).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.verify(), Ok(()));
    }

    #[test]
    fn test_swapped_committed_value_detected() {
        let mut forged = transcript();
        forged.throw.reveal.value = 4;
        forged.throw.index = 0;
        assert_eq!(forged.verify(), Err(ProtocolError::VerificationFailed));
    }

    #[test]
    fn test_wrong_index_detected() {
        let mut forged = transcript();
        forged.throw.index = 1;
        assert_eq!(forged.verify(), Err(ProtocolError::VerificationFailed));
    }

    #[test]
    fn test_wrong_result_detected() {
        let mut forged = transcript();
        forged.round.result = forged.round.result.swapped();
        assert_eq!(forged.verify(), Err(ProtocolError::VerificationFailed));
    }

    #[test]
    fn test_coin_flip_claim_detected() {
        let mut forged = transcript();
        forged.coin_flip.guessed_right = false;
        assert_eq!(forged.verify(), Err(ProtocolError::VerificationFailed));
    }
}
