use super::{write_out, Builtin, CommandError};
use crate::core::state::SessionState;
use crate::input::HistoryEntry;

#[derive(Clone, Copy, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    fn show_recent(&self, session: &SessionState, count: usize) -> Result<i32, CommandError> {
        let history = &session.history;
        let skip = history.len().saturating_sub(count);

        let mut text = String::new();
        for (index, entry) in history.iter().enumerate().skip(skip) {
            text.push_str(&format_entry(index + 1, entry));
            text.push('\n');
        }
        write_out(&text)?;
        Ok(0)
    }
}

impl Builtin for HistoryCommand {
    fn execute(&self, args: &[String], session: &mut SessionState) -> Result<i32, CommandError> {
        match args {
            [] => self.show_recent(session, usize::MAX),
            [flag] if flag == "-c" => {
                session.history.clear();
                Ok(0)
            }
            [count] => {
                let count = count.parse::<usize>().map_err(|_| {
                    CommandError::InvalidArguments(format!("{}: numeric argument required", count))
                })?;
                self.show_recent(session, count)
            }
            _ => Err(CommandError::InvalidArguments(
                "usage: history [n | -c]".to_string(),
            )),
        }
    }
}

fn format_entry(number: usize, entry: &HistoryEntry) -> String {
    format!(
        "{:>5}  {}  [{}] {}",
        number,
        format_timestamp(entry.timestamp),
        entry.exit_code,
        entry.command
    )
}

fn format_timestamp(timestamp: u64) -> String {
    let secs = timestamp % 60;
    let mins = (timestamp / 60) % 60;
    let hours = (timestamp / 3600) % 24;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
