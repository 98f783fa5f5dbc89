use super::ConfigError;
use crate::path::home_dir;
use std::path::PathBuf;

const HISTORY_FILE_NAME: &str = ".husk_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = home_dir().ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            history_path: home.join(HISTORY_FILE_NAME),
        })
    }
}
