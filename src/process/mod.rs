use std::fmt;

pub mod executor;
pub mod jobs;
pub mod redirect;
pub mod signal;

pub use executor::ProcessExecutor;
pub use jobs::{FinishedJob, JobTable, Termination};
pub use redirect::Redirection;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    Redirect {
        path: String,
        source: std::io::Error,
    },
    Spawn {
        name: String,
        source: std::io::Error,
    },
    SignalError(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::Redirect { path, source } => write!(f, "{}: {}", path, source),
            ProcessError::Spawn { name, source } => write!(f, "{}: {}", name, source),
            ProcessError::SignalError(msg) => write!(f, "signal error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Redirect { source, .. } | ProcessError::Spawn { source, .. } => {
                Some(source)
            }
            ProcessError::Io(e) => Some(e),
            _ => None,
        }
    }
}
