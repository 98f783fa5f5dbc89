/// Splits `text` on any of `delimiters`, dropping empty parts.
///
/// Runs of delimiters collapse, so `"a;;b"` yields `["a", "b"]`.
pub fn split(text: &str, delimiters: &[char]) -> Vec<String> {
    text.split(|c: char| delimiters.contains(&c))
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whitespace set used for argument tokenization.
pub const WHITESPACE: &[char] = &[' ', '\t'];
