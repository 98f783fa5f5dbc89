use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ExitStatus};

use super::signal::signal_name;

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

impl From<ExitStatus> for Termination {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Termination::Exited(code),
            (None, Some(signal)) => Termination::Signaled(signal),
            (None, None) => Termination::Exited(-1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedJob {
    pub pid: u32,
    pub name: String,
    pub termination: Termination,
}

impl fmt::Display for FinishedJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.termination {
            Termination::Exited(code) => {
                write!(f, "[{}] Done (exit {}) {}", self.pid, code, self.name)
            }
            Termination::Signaled(signal) => write!(
                f,
                "[{}] Terminated by {} {}",
                self.pid,
                signal_name(signal),
                self.name
            ),
        }
    }
}

struct Job {
    name: String,
    child: Child,
}

/// Background children that have not been reaped yet.
#[derive(Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, child: Child) {
        self.jobs.push(Job {
            name: name.into(),
            child,
        });
    }

    /// Collects every job that has exited, without blocking.
    pub fn reap(&mut self) -> Vec<FinishedJob> {
        let mut finished = Vec::new();
        self.jobs.retain_mut(|job| {
            let pid = job.child.id();
            match job.child.try_wait() {
                Ok(Some(status)) => {
                    finished.push(FinishedJob {
                        pid,
                        name: job.name.clone(),
                        termination: status.into(),
                    });
                    false
                }
                Ok(None) => true,
                Err(e) => {
                    log::warn!("dropping job {} ({}): {}", pid, job.name, e);
                    false
                }
            }
        });
        finished
    }

    pub fn pids(&self) -> Vec<u32> {
        self.jobs.iter().map(|job| job.child.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
