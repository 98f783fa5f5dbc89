use super::{Builtin, CommandError};
use crate::core::state::SessionState;
use crate::path::PathExpander;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Default)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Builtin for CdCommand {
    fn execute(&self, args: &[String], session: &mut SessionState) -> Result<i32, CommandError> {
        let target: PathBuf = match args {
            [] => env::var_os("HOME")
                .filter(|home| !home.is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| CommandError::ExecutionError("HOME not set".to_string()))?,
            [path] => self
                .path_expander
                .expand(path)
                .map_err(|e| CommandError::ExecutionError(e.to_string()))?,
            _ => {
                return Err(CommandError::InvalidArguments(
                    "too many arguments".to_string(),
                ))
            }
        };

        env::set_current_dir(&target).map_err(|e| {
            CommandError::ExecutionError(format!("{}: {}", target.display(), e))
        })?;
        session.refresh_current_dir();
        Ok(0)
    }
}
