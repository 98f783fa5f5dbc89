use crate::core::{commands::CommandExecutor, config::ShellConfig, state::SessionState};
use crate::input::HistoryError;
use crate::process::FinishedJob;

/// The shell minus its terminal: configuration, state and the dispatcher.
pub struct Session {
    pub(crate) config: ShellConfig,
    pub(crate) state: SessionState,
    pub(crate) executor: CommandExecutor,
}

impl Session {
    /// A session with empty history; call [`Session::load_history`] to
    /// pick up the persisted entries.
    pub fn new(config: ShellConfig) -> Self {
        let history = config.history_store();
        Session {
            config,
            state: SessionState::new(history),
            executor: CommandExecutor::new(),
        }
    }

    pub fn load_history(&mut self) -> Result<usize, HistoryError> {
        self.state.history.load()
    }

    /// Persists history, reporting but not propagating failure.
    pub fn save_history(&self) {
        if let Err(e) = self.state.history.save() {
            log::warn!(
                "could not save history to {}: {}",
                self.state.history.file_path().display(),
                e
            );
            eprintln!("husk: could not save history: {}", e);
        }
    }

    /// Reaps finished background jobs without waiting.
    pub fn harvest(&mut self) -> Vec<FinishedJob> {
        self.executor.harvest()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}
