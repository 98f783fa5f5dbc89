use super::{write_out, Builtin, CommandError};
use crate::core::state::SessionState;

const USAGE: &[(&str, &str)] = &[
    ("cd [dir]", "change the current directory (default: $HOME)"),
    ("pwd", "print the current directory"),
    ("echo [text...]", "print the arguments"),
    ("exit [code]", "leave the shell"),
    ("help", "show this help"),
    ("clear", "clear the screen"),
    ("history [n | -c]", "list the last n commands, or clear the list"),
    ("touch file...", "create files or update their timestamps"),
    ("rm file...", "remove files"),
    ("mkdir dir...", "create directories"),
    ("rmdir dir...", "remove empty directories"),
    ("ls [-a] [dir...]", "list directory contents"),
];

#[derive(Clone, Copy, Default)]
pub struct HelpCommand;

impl Builtin for HelpCommand {
    fn execute(&self, _args: &[String], _session: &mut SessionState) -> Result<i32, CommandError> {
        let mut text = String::from("husk built-in commands:\n");
        for (usage, description) in USAGE {
            text.push_str(&format!("  {:<20} {}\n", usage, description));
        }
        text.push_str("\nSyntax: cmd [args] [< in] [> out] [&] ; cmd ...\n");
        text.push_str("History: !n runs entry n, !prefix the latest entry starting with prefix.\n");
        text.push_str("Any other name is run as a program found on PATH.\n");
        write_out(&text)?;
        Ok(0)
    }
}
