//! Console trait definition.

use std::io;

/// Line-oriented interactive I/O.
///
/// This trait abstracts the terminal the game talks to.
/// Implementations can be:
/// - TerminalConsole over stdin/stdout for play
/// - ScriptedConsole with canned input for testing
pub trait Console {
    /// Write `text` followed by a newline
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `None` once the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}
