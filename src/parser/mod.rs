//! Turns one input line into the commands it contains.
//!
//! A line is split on `;` into segments. Each segment is scanned for the
//! `&`, `<` and `>` markers by first occurrence, in that order, and what is
//! left is split on whitespace into the argument list. There is no quoting,
//! escaping or variable expansion at this layer.

pub mod tokenizer;

use std::fmt;

const STATEMENT_SEPARATOR: char = ';';
const BACKGROUND_MARKER: char = '&';
const INPUT_MARKER: char = '<';
const OUTPUT_MARKER: char = '>';

/// One invocation unit produced from a `;`-delimited segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Copy of `args[0]`.
    pub name: String,
    pub args: Vec<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub background: bool,
    /// Trimmed segment text as it was typed, markers included.
    pub source: String,
}

impl Command {
    /// Builds a foreground command with no redirections from an argument list.
    ///
    /// Returns `None` for an empty list.
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let name = args.first()?.clone();
        let source = args.join(" ");
        Some(Command {
            name,
            args,
            input_file: None,
            output_file: None,
            background: false,
            source,
        })
    }

    /// Arguments after the command name.
    pub fn operands(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Segments beyond this count are dropped.
    pub max_commands: usize,
    /// Arguments beyond this count are dropped.
    pub max_args: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_commands: 64,
            max_args: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptySegment,
    NoArguments,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptySegment => write!(f, "empty command"),
            ParseError::NoArguments => write!(f, "no command name"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses every segment of `line`. Segments that fail to parse are skipped.
pub fn parse(line: &str, limits: &ParseLimits) -> Vec<Command> {
    tokenizer::split(line, &[STATEMENT_SEPARATOR])
        .iter()
        .take(limits.max_commands)
        .filter_map(|segment| match parse_segment(segment, limits) {
            Ok(command) => Some(command),
            Err(e) => {
                log::debug!("skipping segment {:?}: {}", segment, e);
                None
            }
        })
        .collect()
}

/// Parses a single segment into a [`Command`].
pub fn parse_segment(segment: &str, limits: &ParseLimits) -> Result<Command, ParseError> {
    let source = segment.trim();
    if source.is_empty() {
        return Err(ParseError::EmptySegment);
    }

    let mut rest = source;
    let mut background = false;
    if let Some(pos) = rest.find(BACKGROUND_MARKER) {
        background = true;
        rest = &rest[..pos];
    }

    // Both markers are located in the same remainder. The input file takes
    // everything after `<`, a later `>` included. The output file stops at
    // `<` only when `<` comes after it.
    let input_pos = rest.find(INPUT_MARKER);
    let output_pos = rest.find(OUTPUT_MARKER);
    let input_file = input_pos.map(|pos| marker_target(rest, pos, None));
    let output_file = output_pos.map(|pos| marker_target(rest, pos, input_pos));

    let args_end = match (input_pos, output_pos) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => rest.len(),
    };

    let mut args = tokenizer::split(&rest[..args_end], tokenizer::WHITESPACE);
    args.truncate(limits.max_args);
    let name = args.first().cloned().ok_or(ParseError::NoArguments)?;

    Ok(Command {
        name,
        args,
        input_file,
        output_file,
        background,
        source: source.to_owned(),
    })
}

fn marker_target(text: &str, marker: usize, other: Option<usize>) -> String {
    let end = match other {
        Some(other) if other > marker => other,
        _ => text.len(),
    };
    // Markers are ASCII, so `marker + 1` is a char boundary.
    text[marker + 1..end].trim().to_owned()
}
