use std::borrow::Cow;

use super::{HistoryError, HistoryStore};

const HISTORY_MARKER: char = '!';

/// Replaces `!<digits>` and `!<prefix>` references with recorded commands.
///
/// Any unresolved reference aborts the whole expansion. A `!` that is not
/// followed by a digit or letter is copied through, as is everything else.
/// Substituted text is not expanded again.
pub fn expand<'a>(line: &'a str, history: &HistoryStore) -> Result<Cow<'a, str>, HistoryError> {
    if !line.contains(HISTORY_MARKER) {
        return Ok(Cow::Borrowed(line));
    }

    let mut result = String::with_capacity(line.len());
    let mut modified = false;
    let mut rest = line;

    while let Some(pos) = rest.find(HISTORY_MARKER) {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        match after.chars().next() {
            Some(c) if c.is_ascii_digit() => {
                let len = after
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after.len());
                let digits = &after[..len];
                // Digit runs too long for usize cannot name an entry.
                let entry = digits
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| history.get_by_index(index))
                    .ok_or_else(|| HistoryError::IndexNotFound(digits.to_owned()))?;
                result.push_str(&entry.command);
                modified = true;
                rest = &after[len..];
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let len = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
                    .unwrap_or(after.len());
                let prefix = &after[..len];
                let entry = history
                    .get_last_by_prefix(prefix)
                    .ok_or_else(|| HistoryError::PrefixNotFound(prefix.to_owned()))?;
                result.push_str(&entry.command);
                modified = true;
                rest = &after[len..];
            }
            _ => {
                result.push(HISTORY_MARKER);
                rest = after;
            }
        }
    }
    result.push_str(rest);

    if modified {
        Ok(Cow::Owned(result))
    } else {
        Ok(Cow::Borrowed(line))
    }
}
