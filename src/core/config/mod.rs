use std::{env, fmt, path::PathBuf};

mod paths;

pub use paths::ConfigPaths;

use crate::flags::Flags;
use crate::highlight::term_supports_color;
use crate::input::history::{
    HistoryStore, DEFAULT_CAPACITY, DEFAULT_MAX_COMMAND_LENGTH, DEFAULT_MAX_FILE_SIZE,
};
use crate::parser::ParseLimits;

/// Settings fixed for the lifetime of one shell process.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub history_file: PathBuf,
    pub history_capacity: usize,
    pub max_history_file_size: u64,
    pub max_command_length: usize,
    pub limits: ParseLimits,
    pub color: bool,
    pub quiet: bool,
    pub debug: bool,
}

impl ShellConfig {
    /// Defaults for everything except where history is kept.
    pub fn new(history_file: PathBuf) -> Self {
        ShellConfig {
            history_file,
            history_capacity: DEFAULT_CAPACITY,
            max_history_file_size: DEFAULT_MAX_FILE_SIZE,
            max_command_length: DEFAULT_MAX_COMMAND_LENGTH,
            limits: ParseLimits::default(),
            color: false,
            quiet: false,
            debug: false,
        }
    }

    pub fn from_flags(flags: &Flags) -> Result<Self, ConfigError> {
        let history_file = match flags.get_value("history") {
            Some(path) => PathBuf::from(path),
            None => ConfigPaths::new()?.history_path,
        };

        let term = env::var("TERM").ok();
        let mut config = ShellConfig::new(history_file);
        config.color = !flags.is_set("no-color") && term_supports_color(term.as_deref());
        config.quiet = flags.is_set("quiet");
        config.debug = flags.is_set("debug");
        Ok(config)
    }

    /// An empty history store bounded by these settings.
    pub fn history_store(&self) -> HistoryStore {
        HistoryStore::new(self.history_file.clone(), self.history_capacity)
            .with_max_file_size(self.max_history_file_size)
            .with_max_command_length(self.max_command_length)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
        }
    }
}

impl std::error::Error for ConfigError {}
