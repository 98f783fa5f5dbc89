//! Built-in commands and the dispatcher that routes between them and
//! external programs.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

mod cd;
mod clear;
mod echo;
mod exit;
mod fs;
mod help;
mod history;
mod ls;
mod pwd;

pub use cd::CdCommand;
pub use clear::ClearCommand;
pub use echo::EchoCommand;
pub use exit::ExitCommand;
pub use fs::{FsCommand, FsOperation};
pub use help::HelpCommand;
pub use history::HistoryCommand;
pub use ls::LsCommand;
pub use pwd::PwdCommand;

use crate::core::state::SessionState;
use crate::parser::Command;
use crate::process::{FinishedJob, ProcessExecutor, Redirection};

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    ExecutionError(String),
    IoError(std::io::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::IoError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// A command implemented inside the shell.
///
/// `args` excludes the command name. The returned code becomes the exit
/// status of the command; errors are reported by the dispatcher as `-1`.
pub trait Builtin {
    fn execute(&self, args: &[String], session: &mut SessionState) -> Result<i32, CommandError>;
}

/// Writes through the process-wide stdout handle so output follows whatever
/// descriptor 1 currently points at.
pub(crate) fn write_out(text: &str) -> Result<(), CommandError> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[derive(Clone)]
enum BuiltinType {
    Cd(CdCommand),
    Pwd(PwdCommand),
    Echo(EchoCommand),
    Exit(ExitCommand),
    Help(HelpCommand),
    Clear(ClearCommand),
    History(HistoryCommand),
    Fs(FsCommand),
    Ls(LsCommand),
}

impl Builtin for BuiltinType {
    fn execute(&self, args: &[String], session: &mut SessionState) -> Result<i32, CommandError> {
        match self {
            BuiltinType::Cd(cmd) => cmd.execute(args, session),
            BuiltinType::Pwd(cmd) => cmd.execute(args, session),
            BuiltinType::Echo(cmd) => cmd.execute(args, session),
            BuiltinType::Exit(cmd) => cmd.execute(args, session),
            BuiltinType::Help(cmd) => cmd.execute(args, session),
            BuiltinType::Clear(cmd) => cmd.execute(args, session),
            BuiltinType::History(cmd) => cmd.execute(args, session),
            BuiltinType::Fs(cmd) => cmd.execute(args, session),
            BuiltinType::Ls(cmd) => cmd.execute(args, session),
        }
    }
}

/// Runs parsed commands: installs redirections, then hands the command to a
/// built-in or to the process executor.
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, BuiltinType>,
    process_executor: ProcessExecutor,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("cd", BuiltinType::Cd(CdCommand::new()));
        commands.insert("pwd", BuiltinType::Pwd(PwdCommand));
        commands.insert("echo", BuiltinType::Echo(EchoCommand));
        commands.insert("exit", BuiltinType::Exit(ExitCommand));
        commands.insert("help", BuiltinType::Help(HelpCommand));
        commands.insert("clear", BuiltinType::Clear(ClearCommand));
        commands.insert("history", BuiltinType::History(HistoryCommand));
        commands.insert("touch", BuiltinType::Fs(FsCommand::new(FsOperation::Touch)));
        commands.insert("rm", BuiltinType::Fs(FsCommand::new(FsOperation::RemoveFile)));
        commands.insert("mkdir", BuiltinType::Fs(FsCommand::new(FsOperation::MakeDir)));
        commands.insert("rmdir", BuiltinType::Fs(FsCommand::new(FsOperation::RemoveDir)));
        commands.insert("ls", BuiltinType::Ls(LsCommand));

        Self {
            commands,
            process_executor: ProcessExecutor::new(),
        }
    }

    /// Executes one command and returns its exit code.
    ///
    /// The shell's standard streams are restored before returning, whatever
    /// the outcome. `-1` means the command could not be run at all.
    pub fn execute(&mut self, cmd: &Command, session: &mut SessionState) -> i32 {
        let mut redirection = match Redirection::apply(cmd) {
            Ok(redirection) => redirection,
            Err(e) => {
                eprintln!("husk: {}", e);
                return -1;
            }
        };

        let exit_code = match self.commands.get(cmd.name.as_str()) {
            Some(builtin) => {
                log::debug!("running built-in {}", cmd.name);
                match builtin.execute(cmd.operands(), session) {
                    Ok(code) => code,
                    Err(e) => {
                        eprintln!("{}: {}", cmd.name, e);
                        -1
                    }
                }
            }
            None => {
                log::debug!("running external {}", cmd.name);
                self.process_executor.run_external(cmd)
            }
        };

        redirection.restore();
        exit_code
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    /// Non-blocking reap of finished background jobs.
    pub fn harvest(&mut self) -> Vec<FinishedJob> {
        self.process_executor.harvest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HistoryStore;
    use crate::parser::{parse_segment, ParseLimits};
    use serial_test::serial;
    use std::fs as stdfs;

    fn setup() -> (CommandExecutor, SessionState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState::new(HistoryStore::new(dir.path().join("history"), 100));
        (CommandExecutor::new(), state, dir)
    }

    fn command(line: &str) -> Command {
        parse_segment(line, &ParseLimits::default()).unwrap()
    }

    #[test]
    fn test_builtin_command_detection() {
        let executor = CommandExecutor::new();
        for name in [
            "cd", "pwd", "echo", "exit", "help", "clear", "history", "touch", "rm", "mkdir",
            "rmdir", "ls",
        ] {
            assert!(executor.is_builtin(name), "{} should be built in", name);
        }
        assert!(!executor.is_builtin("cat"));
        assert!(!executor.is_builtin(""));
    }

    #[test]
    #[serial]
    fn test_echo_into_file() {
        let (mut executor, mut state, dir) = setup();
        let out = dir.path().join("out.txt");

        let code = executor.execute(&command(&format!("echo hi > {}", out.display())), &mut state);
        assert_eq!(code, 0);
        assert_eq!(stdfs::read_to_string(&out).unwrap(), "hi\n");
    }

    #[test]
    #[serial]
    fn test_external_with_both_redirections() {
        let (mut executor, mut state, dir) = setup();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        stdfs::write(&input, "line one\nline two\n").unwrap();

        let line = format!("cat > {} < {}", output.display(), input.display());
        assert_eq!(executor.execute(&command(&line), &mut state), 0);
        assert_eq!(
            stdfs::read_to_string(&output).unwrap(),
            "line one\nline two\n"
        );
    }

    #[test]
    #[serial]
    fn test_missing_input_file_is_minus_one() {
        let (mut executor, mut state, dir) = setup();
        let missing = dir.path().join("missing.txt");

        let code = executor.execute(&command(&format!("cat < {}", missing.display())), &mut state);
        assert_eq!(code, -1);
    }

    #[test]
    #[serial]
    fn test_unopenable_output_is_minus_one() {
        let (mut executor, mut state, dir) = setup();
        let bad = dir.path().join("no/such/dir/out.txt");

        let code = executor.execute(&command(&format!("echo hi > {}", bad.display())), &mut state);
        assert_eq!(code, -1);
    }

    #[test]
    fn test_exit_sets_flag_without_terminating() {
        let (mut executor, mut state, _dir) = setup();
        assert_eq!(executor.execute(&command("exit 3"), &mut state), 3);
        assert!(state.should_exit);
    }

    #[test]
    fn test_external_exit_codes() {
        let (mut executor, mut state, _dir) = setup();
        assert_eq!(executor.execute(&command("true"), &mut state), 0);
        assert_eq!(executor.execute(&command("false"), &mut state), 1);
        assert_eq!(
            executor.execute(&command("no-such-program-for-husk"), &mut state),
            -1
        );
    }

    #[test]
    fn test_builtin_error_is_minus_one() {
        let (mut executor, mut state, _dir) = setup();
        assert_eq!(executor.execute(&command("cd a b"), &mut state), -1);
        assert_eq!(executor.execute(&command("touch"), &mut state), -1);
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::InvalidArguments("bad args".to_string()),
            CommandError::ExecutionError("failed".to_string()),
            CommandError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "io error",
            )),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
