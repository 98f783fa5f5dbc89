//! Scoped replacement of the shell's standard input and output.
//!
//! A [`Redirection`] saves a descriptor the first time it replaces it and
//! puts every saved descriptor back when restored or dropped, so the
//! original streams come back on every exit path, including a failed open
//! halfway through [`Redirection::apply`].

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    os::unix::{
        fs::OpenOptionsExt,
        io::{AsRawFd, RawFd},
    },
};

use super::ProcessError;
use crate::parser::Command;

const OUTPUT_MODE: u32 = 0o644;

#[derive(Debug, Default)]
pub struct Redirection {
    saved_stdin: Option<RawFd>,
    saved_stdout: Option<RawFd>,
}

impl Redirection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the redirections `cmd` asks for.
    ///
    /// On error everything already installed is undone before returning.
    pub fn apply(cmd: &Command) -> Result<Self, ProcessError> {
        let mut redirection = Self::new();

        if let Some(path) = &cmd.input_file {
            let file = File::open(path).map_err(|source| ProcessError::Redirect {
                path: path.clone(),
                source,
            })?;
            redirection.replace(&file, libc::STDIN_FILENO)?;
        }

        if let Some(path) = &cmd.output_file {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(OUTPUT_MODE)
                .open(path)
                .map_err(|source| ProcessError::Redirect {
                    path: path.clone(),
                    source,
                })?;
            redirection.replace(&file, libc::STDOUT_FILENO)?;
        }

        Ok(redirection)
    }

    /// Saves `target` once, then points it at `file`.
    fn replace(&mut self, file: &File, target: RawFd) -> Result<(), ProcessError> {
        self.save(target)?;
        flush_stdout();
        // SAFETY: both descriptors are open for the duration of the call.
        if unsafe { libc::dup2(file.as_raw_fd(), target) } == -1 {
            return Err(io::Error::last_os_error().into());
        }
        Ok(())
    }

    fn save(&mut self, target: RawFd) -> io::Result<()> {
        let slot = match target {
            libc::STDIN_FILENO => &mut self.saved_stdin,
            _ => &mut self.saved_stdout,
        };
        if slot.is_some() {
            return Ok(());
        }

        // SAFETY: dup has no memory-safety preconditions.
        let saved = unsafe { libc::dup(target) };
        if saved == -1 {
            return Err(io::Error::last_os_error());
        }
        *slot = Some(saved);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.saved_stdin.is_some() || self.saved_stdout.is_some()
    }

    /// Puts the saved descriptors back. Calling it again is a no-op.
    pub fn restore(&mut self) {
        if let Some(saved) = self.saved_stdin.take() {
            restore_descriptor(saved, libc::STDIN_FILENO);
        }
        if let Some(saved) = self.saved_stdout.take() {
            flush_stdout();
            restore_descriptor(saved, libc::STDOUT_FILENO);
        }
    }
}

impl Drop for Redirection {
    fn drop(&mut self) {
        self.restore();
    }
}

fn restore_descriptor(saved: RawFd, target: RawFd) {
    // SAFETY: `saved` came from dup and is owned by us until closed here.
    unsafe {
        if libc::dup2(saved, target) == -1 {
            log::error!(
                "failed to restore descriptor {}: {}",
                target,
                io::Error::last_os_error()
            );
        }
        libc::close(saved);
    }
}

fn flush_stdout() {
    if let Err(e) = io::stdout().flush() {
        log::debug!("failed to flush stdout: {}", e);
    }
}
