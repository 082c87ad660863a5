//! Menus and the re-prompting selection loop.
//!
//! Every prompt accepts two control inputs on top of its own options,
//! matched case-insensitively: `x` aborts the game and `h` shows help.

use super::traits::Console;
use crate::error::{Flow, GameError, Halt};
use tracing::debug;

pub const SELECTION_PROMPT: &str = "Your selection: ";
pub const ABORT_MESSAGE: &str = "Game over.";
pub const INVALID_MESSAGE: &str = "Invalid selection. Try again.";

/// A numbered menu shown before each selection prompt
#[derive(Clone, Debug)]
pub struct Menu {
    title: String,
    options: Vec<(String, String)>,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Vec::new(),
        }
    }

    /// Menu offering every number in `0..count`
    pub fn numbered(title: impl Into<String>, count: usize) -> Self {
        (0..count).fold(Self::new(title), |menu, i| {
            menu.option(i.to_string(), i.to_string())
        })
    }

    pub fn option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((key.into(), label.into()));
        self
    }

    /// Menu text including the exit and help entries
    pub fn render(&self) -> String {
        let mut lines = vec![self.title.clone()];
        lines.extend(
            self.options
                .iter()
                .map(|(key, label)| format!("{} - {}", key, label)),
        );
        lines.push("X - exit".to_string());
        lines.push("H - help".to_string());
        lines.join("\n")
    }
}

/// One line of user input, classified
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Abort,
    Help,
    Answer(&'a str),
}

impl<'a> Input<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("x") {
            Input::Abort
        } else if trimmed.eq_ignore_ascii_case("h") {
            Input::Help
        } else {
            Input::Answer(trimmed)
        }
    }
}

/// Show `menu` and read until `parse` accepts an answer.
///
/// Rejected answers are reported and re-prompted; they never advance the
/// caller. `x` prints the abort acknowledgment and returns `Halt::Abort`.
pub fn ask<C, T, F>(console: &mut C, menu: &Menu, help: &str, mut parse: F) -> Flow<T>
where
    C: Console + ?Sized,
    F: FnMut(&str) -> Option<T>,
{
    loop {
        console.print(&menu.render())?;
        let Some(line) = console.read_line(SELECTION_PROMPT)? else {
            return Err(GameError::InputClosed.into());
        };

        match Input::classify(&line) {
            Input::Abort => {
                console.print(ABORT_MESSAGE)?;
                return Err(Halt::Abort);
            }
            Input::Help => console.print(help)?,
            Input::Answer(answer) => match parse(answer) {
                Some(value) => return Ok(value),
                None => {
                    debug!(answer, "rejected selection");
                    console.print(INVALID_MESSAGE)?;
                }
            },
        }
    }
}

/// Parse a number in `0..bound`
pub fn parse_below(answer: &str, bound: usize) -> Option<usize> {
    answer.parse::<usize>().ok().filter(|n| *n < bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    fn ask_digit(console: &mut ScriptedConsole) -> Flow<usize> {
        let menu = Menu::numbered("Pick one.", 6);
        ask(console, &menu, "HELP TEXT", |a| parse_below(a, 6))
    }

    #[test]
    fn test_menu_render() {
        let menu = Menu::numbered("Pick.", 2);
        assert_eq!(menu.render(), "Pick.\n0 - 0\n1 - 1\nX - exit\nH - help");
    }

    #[test]
    fn test_classify_control_inputs() {
        assert_eq!(Input::classify("X"), Input::Abort);
        assert_eq!(Input::classify(" x "), Input::Abort);
        assert_eq!(Input::classify("H"), Input::Help);
        assert_eq!(Input::classify(" 4\t"), Input::Answer("4"));
    }

    #[test]
    fn test_valid_answer_returns_immediately() {
        let mut console = ScriptedConsole::new(["3"]);
        assert_eq!(ask_digit(&mut console).unwrap(), 3);
        assert_eq!(console.prompts_shown(), 1);
    }

    #[test]
    fn test_out_of_range_reprompts() {
        let mut console = ScriptedConsole::new(["7", "abc", "-1", "5"]);
        assert_eq!(ask_digit(&mut console).unwrap(), 5);
        assert_eq!(console.prompts_shown(), 4);
        assert_eq!(console.count(INVALID_MESSAGE), 3);
    }

    #[test]
    fn test_help_reprompts() {
        let mut console = ScriptedConsole::new(["h", "0"]);
        assert_eq!(ask_digit(&mut console).unwrap(), 0);
        assert!(console.printed("HELP TEXT"));
        assert_eq!(console.count(INVALID_MESSAGE), 0);
    }

    #[test]
    fn test_abort() {
        let mut console = ScriptedConsole::new(["X", "1"]);
        let halt = ask_digit(&mut console).unwrap_err();
        assert!(halt.is_abort());
        assert!(console.printed(ABORT_MESSAGE));
        assert_eq!(console.remaining_inputs(), 1);
    }

    #[test]
    fn test_closed_input() {
        let mut console = ScriptedConsole::new(["9"]);
        let halt = ask_digit(&mut console).unwrap_err();
        assert!(matches!(halt, Halt::Failed(GameError::InputClosed)));
    }
}
