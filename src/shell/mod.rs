use std::env;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rustyline::{error::ReadlineError, DefaultEditor};

mod executor;
mod session;

pub use executor::CommandHandler;
pub use session::Session;

use crate::{
    core::config::ShellConfig, error::ShellError, highlight::Theme,
    process::signal::setup_signal_handlers,
};

/// Interactive front end: a line editor wrapped around a [`Session`].
pub struct Shell {
    editor: DefaultEditor,
    session: Session,
    theme: Theme,
    interrupted: Arc<AtomicBool>,
    user: String,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Result<Self, ShellError> {
        let mut editor = DefaultEditor::new()?;
        let theme = Theme::new(config.color);

        let interrupted = Arc::new(AtomicBool::new(false));
        setup_signal_handlers(&interrupted)?;

        let mut session = Session::new(config);
        match session.load_history() {
            Ok(count) => log::debug!("loaded {} history entries", count),
            Err(e) => {
                log::warn!("history not loaded: {}", e);
                eprintln!("husk: history not loaded: {}", e);
            }
        }

        for entry in session.state().history.iter() {
            if let Err(e) = editor.add_history_entry(entry.command.as_str()) {
                log::debug!("could not seed line editor history: {}", e);
                break;
            }
        }

        let user = env::var("USER").unwrap_or_else(|_| "user".to_string());

        Ok(Shell {
            editor,
            session,
            theme,
            interrupted,
            user,
        })
    }

    /// Reads and runs lines until `exit` or end of input, then persists
    /// history. Returns the exit code of the last command.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        if !self.session.config().quiet {
            println!(
                "{}",
                self.theme
                    .highlight_hint("husk: type 'help' for built-in commands")
            );
        }

        while !self.session.state().should_exit {
            self.session.harvest();

            let state = self.session.state_mut();
            state.refresh_current_dir();
            state.prompt = self.theme.prompt(&self.user, &state.current_dir);
            let prompt = state.prompt.clone();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            log::debug!("could not add line to editor history: {}", e);
                        }
                    }

                    if let Err(e) = self.session.execute_line(&line) {
                        eprintln!("{}", self.theme.highlight_error(&format!("husk: {}", e)));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    log::debug!("input interrupted");
                }
                Err(ReadlineError::Eof) => {
                    if !self.session.config().quiet {
                        println!("exit");
                    }
                    break;
                }
                Err(e) => {
                    log::error!("failed to read input: {}", e);
                    eprintln!("{}", self.theme.highlight_error(&format!("husk: {}", e)));
                    break;
                }
            }

            if self.interrupted.swap(false, Ordering::Relaxed) {
                log::debug!("interrupt observed");
            }
        }

        self.session.save_history();
        Ok(self.session.state().last_exit_code)
    }
}
