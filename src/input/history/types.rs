use std::time::{SystemTime, UNIX_EPOCH};

const FIELD_SEPARATOR: char = '|';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub command: String,
    pub timestamp: u64,
    pub exit_code: i32,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>, exit_code: i32) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        HistoryEntry {
            command: command.into(),
            timestamp,
            exit_code,
        }
    }

    /// `<timestamp>|<exit-code>|<command>`, the on-disk form of one entry.
    pub fn to_record(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.timestamp,
            self.exit_code,
            self.command,
            sep = FIELD_SEPARATOR
        )
    }

    /// Parses a record written by [`HistoryEntry::to_record`].
    ///
    /// The command field is everything after the second separator, so it may
    /// itself contain `|`.
    pub fn from_record(line: &str) -> Option<Self> {
        let mut fields = line.splitn(3, FIELD_SEPARATOR);
        let timestamp = fields.next()?.trim().parse().ok()?;
        let exit_code = fields.next()?.trim().parse().ok()?;
        let command = fields.next()?;
        if command.trim().is_empty() {
            return None;
        }

        Some(HistoryEntry {
            command: command.to_owned(),
            timestamp,
            exit_code,
        })
    }
}

/// Cuts `text` to at most `max_len` bytes without splitting a character.
pub(crate) fn truncate_command(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_format() {
        let entry = HistoryEntry {
            command: "ls -la".to_string(),
            timestamp: 1700000000,
            exit_code: -1,
        };
        assert_eq!(entry.to_record(), "1700000000|-1|ls -la");
        assert_eq!(HistoryEntry::from_record("1700000000|-1|ls -la"), Some(entry));
    }

    #[test]
    fn test_command_may_contain_separator() {
        let entry = HistoryEntry::from_record("5|0|echo a|b").unwrap();
        assert_eq!(entry.command, "echo a|b");
    }

    #[test]
    fn test_malformed_records() {
        assert_eq!(HistoryEntry::from_record(""), None);
        assert_eq!(HistoryEntry::from_record("ls -la"), None);
        assert_eq!(HistoryEntry::from_record("abc|0|ls"), None);
        assert_eq!(HistoryEntry::from_record("1|x|ls"), None);
        assert_eq!(HistoryEntry::from_record("1|0|"), None);
    }

    #[test]
    fn test_new_sets_timestamp() {
        let entry = HistoryEntry::new("pwd", 0);
        assert!(entry.timestamp > 0);
        assert_eq!(entry.exit_code, 0);
    }

    #[test]
    fn test_truncate_command() {
        assert_eq!(truncate_command("hello", 10), "hello");
        assert_eq!(truncate_command("hello", 3), "hel");
        // '值' is three bytes wide.
        assert_eq!(truncate_command("a值", 2), "a");
    }
}
