use super::{Builtin, CommandError};
use crate::core::state::SessionState;

/// Asks the session loop to stop; the process is not terminated here.
#[derive(Clone, Copy, Default)]
pub struct ExitCommand;

impl Builtin for ExitCommand {
    fn execute(&self, args: &[String], session: &mut SessionState) -> Result<i32, CommandError> {
        session.should_exit = true;
        Ok(args.first().map_or(0, |arg| leading_integer(arg)))
    }
}

/// Parses an optional sign and leading digits, ignoring the rest.
/// Anything unparsable, including overflow, is `0`.
fn leading_integer(text: &str) -> i32 {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_end = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |pos| pos + sign_len);
    text[..digits_end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HistoryStore;

    #[test]
    fn test_exit_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SessionState::new(HistoryStore::new(dir.path().join("history"), 10));

        let cmd = ExitCommand;
        assert_eq!(cmd.execute(&[], &mut state).unwrap(), 0);
        assert!(state.should_exit);
        assert_eq!(cmd.execute(&["42".to_string()], &mut state).unwrap(), 42);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("7"), 7);
        assert_eq!(leading_integer("-2"), -2);
        assert_eq!(leading_integer("+5"), 5);
        assert_eq!(leading_integer("12abc"), 12);
        assert_eq!(leading_integer("abc"), 0);
        assert_eq!(leading_integer("-"), 0);
        assert_eq!(leading_integer("99999999999"), 0);
    }
}
