//! The shared pool of unclaimed dice.

use super::Die;
use crate::error::{ArgsError, ProtocolError};

/// Minimum number of dice sets a game needs
pub const MIN_DICE_SETS: usize = 3;

/// Unclaimed dice. Claiming removes a die permanently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DicePool {
    dice: Vec<Die>,
}

impl DicePool {
    pub fn new(dice: Vec<Die>) -> Self {
        Self { dice }
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn as_slice(&self) -> &[Die] {
        &self.dice
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    /// Remove and return the die at `index`
    pub fn claim(&mut self, index: usize) -> Result<Die, ProtocolError> {
        if self.dice.is_empty() {
            return Err(ProtocolError::EmptyPool);
        }
        if index >= self.dice.len() {
            return Err(ProtocolError::IndexOutOfRange {
                index,
                len: self.dice.len(),
            });
        }
        Ok(self.dice.remove(index))
    }
}

/// Validate command-line dice sets and build the initial pool.
///
/// The set count is checked before any set is parsed.
pub fn parse_dice_sets<S: AsRef<str>>(args: &[S], min_sets: usize) -> Result<DicePool, ArgsError> {
    if args.len() < min_sets {
        return Err(ArgsError::NotEnoughSets {
            found: args.len(),
            required: min_sets,
        });
    }

    let dice = args
        .iter()
        .enumerate()
        .map(|(set, text)| Die::parse(set, text.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DicePool::new(dice))
}
