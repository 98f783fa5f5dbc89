mod expander;
mod file_ops;
pub mod types;

use std::{collections::VecDeque, fmt, path::Path, path::PathBuf};

use self::file_ops::FileOps;
use self::types::truncate_command;

pub use expander::expand;
pub use types::HistoryEntry;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
pub const DEFAULT_MAX_COMMAND_LENGTH: usize = 1024;

#[derive(Debug)]
pub enum HistoryError {
    /// Carries the digits as typed.
    IndexNotFound(String),
    PrefixNotFound(String),
    FileTooLarge { size: u64, limit: u64 },
    Io(std::io::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::IndexNotFound(n) => write!(f, "!{}: event not found", n),
            HistoryError::PrefixNotFound(prefix) => write!(f, "!{}: event not found", prefix),
            HistoryError::FileTooLarge { size, limit } => write!(
                f,
                "history file is too large ({} bytes, limit {} bytes)",
                size, limit
            ),
            HistoryError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<std::io::Error> for HistoryError {
    fn from(e: std::io::Error) -> Self {
        HistoryError::Io(e)
    }
}

/// Fixed-capacity, insertion-ordered log of executed commands.
///
/// Once full, each append evicts the oldest entry. History numbers are
/// 1-based positions in the current ordering, so they shift on eviction.
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    cursor: usize,
    max_file_size: u64,
    max_command_length: usize,
    file_ops: FileOps,
}

impl HistoryStore {
    pub fn new(history_file: PathBuf, capacity: usize) -> Self {
        HistoryStore {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: 0,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_command_length: DEFAULT_MAX_COMMAND_LENGTH,
            file_ops: FileOps::new(history_file),
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_max_command_length(mut self, max_command_length: usize) -> Self {
        self.max_command_length = max_command_length;
        self
    }

    /// Records a finished command. Blank text is ignored.
    pub fn append(&mut self, text: &str, exit_code: i32) {
        if text.trim().is_empty() || self.capacity == 0 {
            return;
        }

        let text = truncate_command(text, self.max_command_length);
        self.push(HistoryEntry::new(text, exit_code));
    }

    fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.cursor = self.entries.len();
    }

    /// Looks up the entry with 1-based history number `n`.
    pub fn get_by_index(&self, n: usize) -> Option<&HistoryEntry> {
        if n == 0 {
            return None;
        }
        self.entries.get(n - 1)
    }

    /// Most recent entry whose text starts with `prefix`.
    pub fn get_last_by_prefix(&self, prefix: &str) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.command.starts_with(prefix))
    }

    /// Replaces the in-memory entries with the persisted ones.
    ///
    /// A missing file is not an error. Returns the number of entries loaded.
    pub fn load(&mut self) -> Result<usize, HistoryError> {
        let loaded = self
            .file_ops
            .load_entries(self.max_file_size, self.capacity)?;

        self.entries.clear();
        for entry in loaded {
            self.push(entry);
        }
        log::debug!(
            "loaded {} history entries from {}",
            self.entries.len(),
            self.file_ops.path().display()
        );
        Ok(self.entries.len())
    }

    /// Writes the stored entries oldest-first, replacing the file.
    pub fn save(&self) -> Result<(), HistoryError> {
        let skip = self.entries.len().saturating_sub(self.capacity);
        self.file_ops.save_entries(self.entries.iter().skip(skip))?;
        log::debug!(
            "saved {} history entries to {}",
            self.entries.len() - skip,
            self.file_ops.path().display()
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Entries oldest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Position one past the newest entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn file_path(&self) -> &Path {
        self.file_ops.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_in(dir: &tempfile::TempDir, capacity: usize) -> HistoryStore {
        HistoryStore::new(dir.path().join("history"), capacity)
    }

    fn commands(store: &HistoryStore) -> Vec<String> {
        store.iter().map(|e| e.command.clone()).collect()
    }

    #[test]
    fn test_append_ignores_blank_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, 5);
        store.append("", 0);
        store.append("   ", 0);
        assert!(store.is_empty());
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_append_evicts_oldest_at_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, DEFAULT_CAPACITY);
        for i in 1..=DEFAULT_CAPACITY + 1 {
            store.append(&format!("cmd {}", i), 0);
        }

        assert_eq!(store.len(), DEFAULT_CAPACITY);
        assert_eq!(store.get_by_index(1).unwrap().command, "cmd 2");
        assert_eq!(
            store.get_by_index(DEFAULT_CAPACITY).unwrap().command,
            format!("cmd {}", DEFAULT_CAPACITY + 1)
        );
        assert_eq!(store.cursor(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_get_by_index_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, 10);
        for cmd in ["a", "b", "c", "d", "e"] {
            store.append(cmd, 0);
        }

        assert_eq!(store.get_by_index(3).unwrap().command, "c");
        assert!(store.get_by_index(0).is_none());
        assert!(store.get_by_index(6).is_none());
    }

    #[test]
    fn test_get_last_by_prefix_prefers_newest() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, 10);
        store.append("ls -l", 0);
        store.append("pwd", 0);
        store.append("ls -a", 2);

        let entry = store.get_last_by_prefix("ls").unwrap();
        assert_eq!(entry.command, "ls -a");
        assert_eq!(entry.exit_code, 2);
        assert!(store.get_last_by_prefix("cat").is_none());
    }

    #[test]
    fn test_append_bounds_command_length() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, 10).with_max_command_length(4);
        store.append("echo hello", 0);
        assert_eq!(store.get_by_index(1).unwrap().command, "echo");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, 3);
        for (i, cmd) in ["one", "two", "three", "four"].iter().enumerate() {
            store.append(cmd, i as i32);
        }
        store.save().unwrap();

        let mut fresh = store_in(&dir, 3);
        assert_eq!(fresh.load().unwrap(), 3);
        assert_eq!(commands(&fresh), vec!["two", "three", "four"]);
        let original: Vec<&HistoryEntry> = store.iter().collect();
        let reloaded: Vec<&HistoryEntry> = fresh.iter().collect();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_load_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, 3);
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_load_refuses_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("history"), "1|0|ls\n".repeat(10)).unwrap();

        let mut store = store_in(&dir, 3).with_max_file_size(16);
        store.append("kept", 0);
        assert!(matches!(store.load(), Err(HistoryError::FileTooLarge { .. })));
        assert_eq!(commands(&store), vec!["kept"]);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, 3);
        store.append("ls", 0);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            HistoryError::IndexNotFound("7".to_string()).to_string(),
            "!7: event not found"
        );
        assert_eq!(
            HistoryError::PrefixNotFound("ls".to_string()).to_string(),
            "!ls: event not found"
        );
    }
}
