//! Error types for the fair dice game.

use thiserror::Error;

/// Errors from validating the dice sets supplied on the command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Error: At least {required} dice sets are required, got {found}.")]
    NotEnoughSets { found: usize, required: usize },

    #[error("Error: Each dice set must contain exactly 6 values (set {set} has {found}).")]
    WrongValueCount { set: usize, found: usize },

    #[error("Error: Each dice set must contain exactly 6 comma-separated non-negative integers (set {set} has {value:?}).")]
    InvalidValue { set: usize, value: String },
}

/// Errors raised by the commitment and game protocols
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Protocol step out of order: expected {expected}, was {actual}")]
    OutOfOrder {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Value {value} is outside 0..{modulus}")]
    ValueOutOfRange { value: u8, modulus: u8 },

    #[error("Dice index {index} is outside 0..{len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No dice left to claim")]
    EmptyPool,

    #[error("Revealed key and value do not reproduce the published proof")]
    VerificationFailed,
}

/// Errors that end a game session
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed before the game finished")]
    InputClosed,

    #[error("Transcript encoding failed: {0}")]
    Transcript(#[from] serde_json::Error),
}

/// Why an interactive step stopped before producing a value.
///
/// `Abort` is the user asking to leave the game and is not a failure.
#[derive(Debug)]
pub enum Halt {
    Abort,
    Failed(GameError),
}

impl Halt {
    pub fn is_abort(&self) -> bool {
        matches!(self, Halt::Abort)
    }
}

impl From<GameError> for Halt {
    fn from(err: GameError) -> Self {
        Halt::Failed(err)
    }
}

impl From<ProtocolError> for Halt {
    fn from(err: ProtocolError) -> Self {
        Halt::Failed(err.into())
    }
}

impl From<std::io::Error> for Halt {
    fn from(err: std::io::Error) -> Self {
        Halt::Failed(err.into())
    }
}

/// Result of an interactive step
pub type Flow<T> = std::result::Result<T, Halt>;
