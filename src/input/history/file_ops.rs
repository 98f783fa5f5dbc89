use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use super::{HistoryEntry, HistoryError};

pub struct FileOps {
    file_path: PathBuf,
}

impl FileOps {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads at most `capacity` entries. A missing file yields no entries; a
    /// file larger than `max_size` bytes is refused without reading it.
    pub fn load_entries(
        &self,
        max_size: u64,
        capacity: usize,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let size = match fs::metadata(&self.file_path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if size > max_size {
            return Err(HistoryError::FileTooLarge {
                size,
                limit: max_size,
            });
        }

        let reader = BufReader::new(File::open(&self.file_path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            if entries.len() >= capacity {
                break;
            }
            let line = line?;
            match HistoryEntry::from_record(&line) {
                Some(entry) => entries.push(entry),
                None if line.trim().is_empty() => {}
                None => log::debug!("skipping malformed history record: {:?}", line),
            }
        }

        Ok(entries)
    }

    /// Overwrites the file with `entries`, one record per line.
    pub fn save_entries<'a, I>(&self, entries: I) -> Result<(), HistoryError>
    where
        I: IntoIterator<Item = &'a HistoryEntry>,
    {
        let mut writer = BufWriter::new(File::create(&self.file_path)?);
        for entry in entries {
            writeln!(writer, "{}", entry.to_record())?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ops = FileOps::new(dir.path().join("absent"));
        assert!(ops.load_entries(1024, 10).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "1|0|ls\n".repeat(100)).unwrap();

        let ops = FileOps::new(path);
        let result = ops.load_entries(64, 10);
        assert!(matches!(
            result,
            Err(HistoryError::FileTooLarge { size: 700, limit: 64 })
        ));
    }

    #[test]
    fn test_load_stops_at_capacity_and_skips_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "1|0|one\ngarbage\n\n2|1|two\n3|0|three\n").unwrap();

        let entries = FileOps::new(path).load_entries(1024, 2).unwrap();
        let commands: Vec<&str> = entries.iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, vec!["one", "two"]);
        assert_eq!(entries[1].exit_code, 1);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "old contents\n").unwrap();

        let entries = vec![HistoryEntry {
            command: "pwd".to_string(),
            timestamp: 42,
            exit_code: 0,
        }];
        FileOps::new(path.clone()).save_entries(&entries).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "42|0|pwd\n");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ops = FileOps::new(dir.path().join("no/such/dir/history"));
        assert!(matches!(
            ops.save_entries(&Vec::new()),
            Err(HistoryError::Io(_))
        ));
    }
}
