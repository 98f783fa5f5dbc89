use crate::error::ShellError;
use std::env;
use std::path::{Path, PathBuf};

/// Home directory from `HOME`, falling back to the platform lookup.
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expands a leading `~` or `~/`; other paths are returned as given.
    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        match path.strip_prefix('~') {
            Some("") => home_dir().ok_or(ShellError::HomeDirNotFound),
            Some(rest) if rest.starts_with('/') => {
                let mut home_path = home_dir().ok_or(ShellError::HomeDirNotFound)?;
                for part in rest.split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                Ok(home_path)
            }
            // "~user" is left alone.
            _ => Ok(Path::new(path).to_path_buf()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_expand_tilde() {
        let old_home = env::var_os("HOME");
        env::set_var("HOME", "/home/tester");

        let expander = PathExpander::new();
        assert_eq!(expander.expand("~").unwrap(), PathBuf::from("/home/tester"));
        assert_eq!(
            expander.expand("~/src//husk").unwrap(),
            PathBuf::from("/home/tester/src/husk")
        );

        match old_home {
            Some(home) => env::set_var("HOME", home),
            None => env::remove_var("HOME"),
        }
    }

    #[test]
    fn test_plain_paths_are_untouched() {
        let expander = PathExpander::new();
        assert_eq!(expander.expand("/tmp").unwrap(), PathBuf::from("/tmp"));
        assert_eq!(expander.expand("rel/dir").unwrap(), PathBuf::from("rel/dir"));
        assert_eq!(expander.expand("~other").unwrap(), PathBuf::from("~other"));
    }
}
