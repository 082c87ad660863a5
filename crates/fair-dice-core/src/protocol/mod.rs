//! Protocol steps of one game, in play order.

mod coin_flip;
mod messages;
mod round;
mod selection;
mod throw;
mod types;

pub use coin_flip::{run_coin_flip, CoinFlip, CoinFlipOutcome, CoinFlipPhase, COIN_MODULUS};
pub use messages::RoundTranscript;
pub use round::{resolve_round, RoundResult};
pub use selection::{claim_in_order, select_die, ClaimedDice};
pub use throw::{joint_index, run_throw, FairThrow, ThrowOutcome, ThrowPhase, THROW_MODULUS};
pub use types::{GameId, GameResult, Party, TurnOrder};
