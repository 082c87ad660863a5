//! Round resolution: both dice read at the joint index, higher face wins.

use super::types::GameResult;
use crate::console::Console;
use crate::dice::Die;
use serde::{Deserialize, Serialize};
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub index: u8,
    pub throw_a: u32,
    pub throw_b: u32,
    pub result: GameResult,
}

/// Read both dice at `index` and compare
pub fn resolve_round(index: u8, die_a: &Die, die_b: &Die) -> RoundResult {
    let throw_a = die_a.face(index as usize);
    let throw_b = die_b.face(index as usize);
    RoundResult {
        index,
        throw_a,
        throw_b,
        result: GameResult::compare(throw_a, throw_b),
    }
}

impl RoundResult {
    /// Announcement from the computer's (party A's) point of view
    pub fn verdict(&self) -> String {
        match self.result {
            GameResult::AWins => format!("I win ({} > {})!", self.throw_a, self.throw_b),
            GameResult::BWins => format!("You win ({} > {})!", self.throw_b, self.throw_a),
            GameResult::Draw => format!("It's a draw ({} = {})!", self.throw_a, self.throw_b),
        }
    }

    pub fn announce<C: Console + ?Sized>(&self, console: &mut C) -> io::Result<()> {
        console.print(&format!("My throw is {}.", self.throw_a))?;
        console.print(&format!("Your throw is {}.", self.throw_b))?;
        console.print(&self.verdict())
    }
}
