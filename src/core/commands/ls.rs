use std::fs;
use std::io;
use std::path::Path;

use super::fs::run_each;
use super::{write_out, Builtin, CommandError};
use crate::core::state::SessionState;

#[derive(Clone, Copy, Default)]
pub struct LsCommand;

impl Builtin for LsCommand {
    fn execute(&self, args: &[String], _session: &mut SessionState) -> Result<i32, CommandError> {
        let show_hidden = args.iter().any(|arg| arg == "-a");
        let mut targets: Vec<String> = args.iter().filter(|arg| *arg != "-a").cloned().collect();
        if targets.is_empty() {
            targets.push(".".to_string());
        }

        let with_headers = targets.len() > 1;
        run_each("ls", &targets, |target| {
            let names = list_entries(Path::new(target), show_hidden)?;
            let mut text = String::new();
            if with_headers {
                text.push_str(&format!("{}:\n", target));
            }
            for name in names {
                text.push_str(&name);
                text.push('\n');
            }
            write_out(&text).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
        })
    }
}

/// Sorted entry names of `path`; directories get a trailing `/`.
/// A non-directory path lists as its own name.
fn list_entries(path: &Path, show_hidden: bool) -> io::Result<Vec<String>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_string_lossy().into_owned()]);
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') && !show_hidden {
            continue;
        }
        if entry.file_type()?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HistoryStore;
    use serial_test::serial;

    #[test]
    fn test_list_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::create_dir(dir.path().join("a_dir")).unwrap();

        assert_eq!(
            list_entries(dir.path(), false).unwrap(),
            vec!["a_dir/", "b.txt"]
        );
        assert_eq!(
            list_entries(dir.path(), true).unwrap(),
            vec![".hidden", "a_dir/", "b.txt"]
        );
    }

    #[test]
    fn test_list_file_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "").unwrap();

        assert_eq!(
            list_entries(&file, false).unwrap(),
            vec![file.to_string_lossy().into_owned()]
        );
        assert!(list_entries(&dir.path().join("missing"), false).is_err());
    }

    #[test]
    #[serial]
    fn test_ls_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SessionState::new(HistoryStore::new(dir.path().join("history"), 10));
        let existing = dir.path().to_string_lossy().into_owned();
        let missing = dir.path().join("missing").to_string_lossy().into_owned();

        assert_eq!(LsCommand.execute(&[existing.clone()], &mut state).unwrap(), 0);
        assert_eq!(
            LsCommand.execute(&[existing, missing.clone()], &mut state).unwrap(),
            1
        );
        assert_eq!(LsCommand.execute(&[missing], &mut state).unwrap(), -1);
    }
}
