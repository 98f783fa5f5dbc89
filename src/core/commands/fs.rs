use std::fs::{self, DirBuilder, OpenOptions};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::time::SystemTime;

use super::{Builtin, CommandError};
use crate::core::state::SessionState;

const DIR_MODE: u32 = 0o755;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FsOperation {
    Touch,
    RemoveFile,
    MakeDir,
    RemoveDir,
}

impl FsOperation {
    fn name(self) -> &'static str {
        match self {
            FsOperation::Touch => "touch",
            FsOperation::RemoveFile => "rm",
            FsOperation::MakeDir => "mkdir",
            FsOperation::RemoveDir => "rmdir",
        }
    }

    fn apply(self, target: &str) -> io::Result<()> {
        match self {
            FsOperation::Touch => {
                let file = OpenOptions::new().create(true).append(true).open(target)?;
                file.set_modified(SystemTime::now())
            }
            FsOperation::RemoveFile => fs::remove_file(target),
            FsOperation::MakeDir => DirBuilder::new().mode(DIR_MODE).create(target),
            FsOperation::RemoveDir => fs::remove_dir(target),
        }
    }
}

/// One of the multi-target file utilities.
#[derive(Clone, Copy, Debug)]
pub struct FsCommand {
    operation: FsOperation,
}

impl FsCommand {
    pub fn new(operation: FsOperation) -> Self {
        Self { operation }
    }
}

impl Builtin for FsCommand {
    fn execute(&self, args: &[String], _session: &mut SessionState) -> Result<i32, CommandError> {
        let operation = self.operation;
        run_each(operation.name(), args, |target| operation.apply(target))
    }
}

/// Applies `op` to every target and folds the results into an exit code:
/// `0` if all succeeded, `1` if only some did, `-1` if none did.
pub(crate) fn run_each<F>(name: &str, targets: &[String], mut op: F) -> Result<i32, CommandError>
where
    F: FnMut(&str) -> io::Result<()>,
{
    if targets.is_empty() {
        return Err(CommandError::InvalidArguments("missing operand".to_string()));
    }

    let mut failed = 0;
    for target in targets {
        if let Err(e) = op(target) {
            eprintln!("{}: {}: {}", name, target, e);
            failed += 1;
        }
    }

    Ok(match failed {
        0 => 0,
        n if n == targets.len() => -1,
        _ => 1,
    })
}
