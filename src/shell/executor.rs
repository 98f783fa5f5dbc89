use std::borrow::Cow;

use super::session::Session;
use crate::error::ShellError;
use crate::input::history;
use crate::parser;

pub trait CommandHandler {
    /// Expands, parses and runs one input line.
    ///
    /// An unresolved history reference rejects the whole line before
    /// anything runs. Otherwise every command runs in order regardless of
    /// the previous one's exit code, and each is recorded in history.
    fn execute_line(&mut self, line: &str) -> Result<(), ShellError>;
}

impl CommandHandler for Session {
    fn execute_line(&mut self, line: &str) -> Result<(), ShellError> {
        if line.trim().is_empty() {
            return Ok(());
        }

        let expanded = history::expand(line, &self.state.history)?;
        if matches!(expanded, Cow::Owned(_)) && !self.config.quiet {
            println!("{}", expanded);
        }

        let commands = parser::parse(&expanded, &self.config.limits);
        for command in &commands {
            let exit_code = self.executor.execute(command, &mut self.state);
            self.state.record(&command.source, exit_code);
            if self.state.should_exit {
                break;
            }
        }

        Ok(())
    }
}
