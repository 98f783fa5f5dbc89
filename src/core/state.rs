use std::env;

use crate::input::HistoryStore;

pub const DEFAULT_PROMPT: &str = "husk$ ";

/// Everything one interactive session mutates between commands.
pub struct SessionState {
    pub prompt: String,
    pub current_dir: String,
    pub last_exit_code: i32,
    pub should_exit: bool,
    pub history: HistoryStore,
}

impl SessionState {
    pub fn new(history: HistoryStore) -> Self {
        let mut state = SessionState {
            prompt: DEFAULT_PROMPT.to_string(),
            current_dir: String::new(),
            last_exit_code: 0,
            should_exit: false,
            history,
        };
        state.refresh_current_dir();
        state
    }

    /// Re-reads the working directory, falling back to `.`.
    pub fn refresh_current_dir(&mut self) {
        self.current_dir = env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_else(|_| ".".to_string());
    }

    /// Stores the outcome of a finished command.
    pub fn record(&mut self, text: &str, exit_code: i32) {
        self.last_exit_code = exit_code;
        self.history.append(text, exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_exit_code_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SessionState::new(HistoryStore::new(dir.path().join("history"), 10));
        assert_eq!(state.prompt, DEFAULT_PROMPT);
        assert!(!state.current_dir.is_empty());

        state.record("false", 1);
        assert_eq!(state.last_exit_code, 1);
        assert_eq!(state.history.get_by_index(1).unwrap().command, "false");
        assert!(!state.should_exit);
    }
}
