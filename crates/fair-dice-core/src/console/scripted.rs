//! Scripted console for testing.

use super::traits::Console;
use std::collections::VecDeque;
use std::io;

/// In-memory console that replays canned input lines and records output
#[derive(Clone, Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: Vec<String>,
    prompts_shown: usize,
}

impl ScriptedConsole {
    /// Create a console that will answer prompts with `inputs` in order
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            prompts_shown: 0,
        }
    }

    /// Every printed line, prompts included
    pub fn lines(&self) -> &[String] {
        &self.output
    }

    /// All output joined with newlines
    pub fn output(&self) -> String {
        self.output.join("\n")
    }

    /// Does any printed line contain `needle`?
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    /// Number of times `needle` appears across printed lines
    pub fn count(&self, needle: &str) -> usize {
        self.output
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }

    pub fn prompts_shown(&self) -> usize {
        self.prompts_shown
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.extend(text.lines().map(str::to_string));
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts_shown += 1;
        let answer = self.inputs.pop_front();
        self.output.push(format!(
            "{}{}",
            prompt,
            answer.as_deref().unwrap_or_default()
        ));
        Ok(answer)
    }
}
