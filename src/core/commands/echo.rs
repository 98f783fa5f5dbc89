use super::{write_out, Builtin, CommandError};
use crate::core::state::SessionState;

#[derive(Clone, Copy, Default)]
pub struct EchoCommand;

impl Builtin for EchoCommand {
    fn execute(&self, args: &[String], _session: &mut SessionState) -> Result<i32, CommandError> {
        write_out(&format!("{}\n", args.join(" ")))?;
        Ok(0)
    }
}
