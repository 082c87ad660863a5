//! A single six-faced die.

use crate::error::ArgsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of faces on every die
pub const FACES: usize = 6;

/// Ordered face values, addressed by face index `0..FACES`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Die([u32; FACES]);

impl Die {
    pub fn new(faces: [u32; FACES]) -> Self {
        Self(faces)
    }

    /// Parse one comma-separated dice set, e.g. `"2,2,4,4,9,9"`.
    ///
    /// `set` is the position of the argument, used in error reports.
    pub fn parse(set: usize, text: &str) -> Result<Self, ArgsError> {
        let values = text
            .split(',')
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|_| ArgsError::InvalidValue {
                    set,
                    value: raw.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let found = values.len();
        let faces: [u32; FACES] = values
            .try_into()
            .map_err(|_| ArgsError::WrongValueCount { set, found })?;
        Ok(Self(faces))
    }

    /// Face value at `index`. Indices wrap modulo `FACES`.
    pub fn face(&self, index: usize) -> u32 {
        self.0[index % FACES]
    }

    pub fn faces(&self) -> &[u32; FACES] {
        &self.0
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", face)?;
        }
        write!(f, "]")
    }
}
