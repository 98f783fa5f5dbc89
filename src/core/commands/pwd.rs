use super::{write_out, Builtin, CommandError};
use crate::core::state::SessionState;
use std::env;

#[derive(Clone, Copy, Default)]
pub struct PwdCommand;

impl Builtin for PwdCommand {
    fn execute(&self, _args: &[String], session: &mut SessionState) -> Result<i32, CommandError> {
        let dir = env::current_dir()?;
        session.refresh_current_dir();
        write_out(&format!("{}\n", dir.display()))?;
        Ok(0)
    }
}
