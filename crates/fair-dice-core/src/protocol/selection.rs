//! Claiming dice from the shared pool in turn order.

use super::types::{Party, TurnOrder};
use crate::console::{ask, parse_below, Console, Menu};
use crate::crypto::EntropySource;
use crate::dice::{DicePool, Die};
use crate::error::{Flow, ProtocolError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The die each party ended up owning
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedDice {
    pub computer: Die,
    pub user: Die,
}

/// Let `party` claim one die, removing it from `pool`.
///
/// The user picks from a numbered menu; the computer picks uniformly.
pub fn select_die<C, E>(
    pool: &mut DicePool,
    party: Party,
    console: &mut C,
    entropy: &mut E,
    help: &str,
) -> Flow<Die>
where
    C: Console + ?Sized,
    E: EntropySource + ?Sized,
{
    if pool.is_empty() {
        return Err(ProtocolError::EmptyPool.into());
    }

    let die = if party.is_interactive() {
        let menu = pool
            .iter()
            .enumerate()
            .fold(Menu::new("Choose your dice:"), |menu, (i, die)| {
                menu.option(i.to_string(), die.to_string())
            });
        let len = pool.len();
        let index = ask(console, &menu, help, |answer| parse_below(answer, len))?;
        let die = pool.claim(index)?;
        console.print(&format!("You choose the {} dice.", die))?;
        die
    } else {
        let index = entropy.pick(pool.len());
        let die = pool.claim(index)?;
        console.print(&format!("I choose the {} dice.", die))?;
        die
    };

    info!(%party, %die, remaining = pool.len(), "die claimed");
    Ok(die)
}

/// Both parties claim a die, the first mover from the fuller pool
pub fn claim_in_order<C, E>(
    pool: &mut DicePool,
    order: TurnOrder,
    console: &mut C,
    entropy: &mut E,
    help: &str,
) -> Flow<ClaimedDice>
where
    C: Console + ?Sized,
    E: EntropySource + ?Sized,
{
    let first = select_die(pool, order.first(), console, entropy, help)?;
    let second = select_die(pool, order.second(), console, entropy, help)?;

    Ok(match order.first() {
        Party::A => ClaimedDice {
            computer: first,
            user: second,
        },
        Party::B => ClaimedDice {
            computer: second,
            user: first,
        },
    })
}
