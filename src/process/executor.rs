use std::io::{self, Write};
use std::process::{Command as ProcessCommand, Stdio};

use super::jobs::{FinishedJob, JobTable, Termination};
use super::signal::signal_name;
use super::ProcessError;
use crate::parser::Command;

/// Runs external programs and keeps track of the ones sent to the background.
#[derive(Default)]
pub struct ProcessExecutor {
    jobs: JobTable,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `cmd` as a child process and returns its exit code.
    ///
    /// Background commands return `0` as soon as the child exists. A child
    /// killed by a signal yields `-1`, as does failing to start one at all.
    pub fn run_external(&mut self, cmd: &Command) -> i32 {
        match self.spawn_process(cmd) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("husk: {}", e);
                -1
            }
        }
    }

    fn spawn_process(&mut self, cmd: &Command) -> Result<i32, ProcessError> {
        // Anything still buffered belongs to the stream as it was before the child.
        io::stdout().flush()?;

        let mut child = ProcessCommand::new(&cmd.name)
            .args(cmd.operands())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    ProcessError::CommandNotFound(cmd.name.clone())
                } else {
                    ProcessError::Spawn {
                        name: cmd.name.clone(),
                        source,
                    }
                }
            })?;

        let pid = child.id();
        if cmd.background {
            eprintln!("[{}] {}", pid, cmd.name);
            log::debug!("started background job {} ({})", pid, cmd.name);
            self.jobs.add(cmd.name.clone(), child);
            return Ok(0);
        }

        let status = child.wait()?;
        match Termination::from(status) {
            Termination::Exited(code) => Ok(code),
            Termination::Signaled(signal) => {
                eprintln!("husk: process {} terminated by {}", pid, signal_name(signal));
                Ok(-1)
            }
        }
    }

    /// Reaps finished background jobs without blocking and reports each one.
    pub fn harvest(&mut self) -> Vec<FinishedJob> {
        let finished = self.jobs.reap();
        for job in &finished {
            eprintln!("{}", job);
            log::debug!("reaped background job {}", job.pid);
        }
        finished
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }
}
