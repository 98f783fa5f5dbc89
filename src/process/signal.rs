use std::borrow::Cow;
use std::sync::{atomic::AtomicBool, Arc};

use signal_hook::consts::{SIGINT, SIGTSTP};

use crate::process::ProcessError;

/// Makes SIGINT and SIGTSTP set `flag` instead of stopping the shell.
///
/// The handler does nothing else; the session loop polls and clears the flag.
pub fn setup_signal_handlers(flag: &Arc<AtomicBool>) -> Result<(), ProcessError> {
    for signal in [SIGINT, SIGTSTP] {
        signal_hook::flag::register(signal, Arc::clone(flag))
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
    }
    Ok(())
}

pub fn signal_name(signal: i32) -> Cow<'static, str> {
    let name = match signal {
        libc::SIGHUP => "SIGHUP",
        libc::SIGINT => "SIGINT",
        libc::SIGQUIT => "SIGQUIT",
        libc::SIGILL => "SIGILL",
        libc::SIGABRT => "SIGABRT",
        libc::SIGBUS => "SIGBUS",
        libc::SIGFPE => "SIGFPE",
        libc::SIGKILL => "SIGKILL",
        libc::SIGUSR1 => "SIGUSR1",
        libc::SIGSEGV => "SIGSEGV",
        libc::SIGUSR2 => "SIGUSR2",
        libc::SIGPIPE => "SIGPIPE",
        libc::SIGALRM => "SIGALRM",
        libc::SIGTERM => "SIGTERM",
        _ => return Cow::Owned(format!("signal {}", signal)),
    };
    Cow::Borrowed(name)
}
