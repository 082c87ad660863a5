//! Fair Dice Core Library
//!
//! This crate provides the commit-reveal primitives, the fair coin-flip and
//! modulo-6 throw protocols, dice selection, and round resolution for a
//! two-party non-transitive dice game.

pub mod console;
pub mod crypto;
pub mod dice;
pub mod error;
pub mod protocol;
pub mod session;

pub use console::{Console, ScriptedConsole, TerminalConsole};
pub use crypto::{Commitment, EntropySource, Proof, Reveal, RngEntropy, SecretKey};
pub use dice::{DicePool, Die, FACES};
pub use error::{ArgsError, GameError, Halt, ProtocolError};
pub use protocol::{GameId, GameResult, Party, RoundResult, RoundTranscript, TurnOrder};
pub use session::{GameConfig, GameSession, SessionOutcome};
