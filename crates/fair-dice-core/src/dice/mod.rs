//! Dice, the shared dice pool, and parsing of dice sets.

mod die;
mod odds;
mod pool;

pub use die::{Die, FACES};
pub use odds::{odds_table, Odds};
pub use pool::{parse_dice_sets, DicePool, MIN_DICE_SETS};
