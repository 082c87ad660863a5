//! Win odds between dice under the shared-index throw.
//!
//! Both parties read their face at the same joint index `r`, so one die
//! beats another with probability `#{r : a[r] > b[r]} / FACES`.

use super::{Die, FACES};
use std::fmt::Write;

/// Face-by-face comparison of two dice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Odds {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Odds {
    /// Compare `die` against `other` at every face index
    pub fn between(die: &Die, other: &Die) -> Self {
        let mut odds = Odds {
            wins: 0,
            losses: 0,
            draws: 0,
        };
        for index in 0..FACES {
            let (a, b) = (die.face(index), other.face(index));
            if a > b {
                odds.wins += 1;
            } else if a < b {
                odds.losses += 1;
            } else {
                odds.draws += 1;
            }
        }
        odds
    }

    pub fn win_probability(&self) -> f64 {
        self.wins as f64 / FACES as f64
    }
}

/// Render the help table: row die's chance of beating each column die
pub fn odds_table(dice: &[Die]) -> String {
    let labels: Vec<String> = dice.iter().map(|d| d.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0).max(8);

    let mut out = String::new();
    let _ = write!(out, "{:<width$}", "user \\ pc", width = width);
    for label in &labels {
        let _ = write!(out, " | {:<width$}", label, width = width);
    }
    out.push('\n');

    for (row, die) in dice.iter().enumerate() {
        let _ = write!(out, "{:<width$}", labels[row], width = width);
        for (col, other) in dice.iter().enumerate() {
            let cell = if row == col {
                "-".to_string()
            } else {
                format!("{:.4}", Odds::between(die, other).win_probability())
            };
            let _ = write!(out, " | {:<width$}", cell, width = width);
        }
        out.push('\n');
    }
    out
}
