//! Interactive console abstraction.

mod prompt;
mod scripted;
mod terminal;
mod traits;

pub use prompt::{
    ask, parse_below, Input, Menu, ABORT_MESSAGE, INVALID_MESSAGE, SELECTION_PROMPT,
};
pub use scripted::ScriptedConsole;
pub use terminal::TerminalConsole;
pub use traits::Console;
