use super::{write_out, Builtin, CommandError};
use crate::core::state::SessionState;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Clone, Copy, Default)]
pub struct ClearCommand;

impl Builtin for ClearCommand {
    fn execute(&self, _args: &[String], _session: &mut SessionState) -> Result<i32, CommandError> {
        write_out(CLEAR_SCREEN)?;
        Ok(0)
    }
}
