//! Line classifier and stream parser
//!
//! Input is read one line at a time. Each line is classified, in order, as a
//! comment (starts with `#`), a `key = value` pair, or a bare option (the
//! first word on the line). Anything else, blank lines included, is skipped.
//! Parsing never fails on content.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;
use crate::error::Result;

pub const COMMENT_MARKER: &str = "#";

// Key is a run of ASCII word characters. The value starts at the first
// non-blank after `=` and ends at the last non-whitespace on the line.
static KEY_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([[:word:]]+)[ \t]*=[ \t]*(.*\S)").expect("key-value pattern is valid")
});

static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[[:word:]]+").expect("option pattern is valid"));

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Comment,
    KeyValue { key: &'a str, value: &'a str },
    Option(&'a str),
    Skip,
}

/// Classifies one line, without its line terminator.
///
/// A line containing a `key = value` pair is never an option. For option
/// lines only the first word counts: `no missedme` yields `no`.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.starts_with(COMMENT_MARKER) {
        return LineKind::Comment;
    }

    if let Some(caps) = KEY_VALUE_RE.captures(line) {
        if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
            return LineKind::KeyValue {
                key: key.as_str(),
                value: value.as_str(),
            };
        }
    }

    match OPTION_RE.find(line) {
        Some(word) => LineKind::Option(word.as_str()),
        None => LineKind::Skip,
    }
}

/// Parses lines from any iterator of strings.
pub fn parse_lines<I, S>(lines: I) -> Config
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = Config::new();
    for (idx, line) in lines.into_iter().enumerate() {
        apply_line(&mut config, idx + 1, line.as_ref());
    }

    tracing::debug!(
        settings = config.settings().len(),
        options = config.options().len(),
        "Parsed configuration"
    );
    config
}

/// Parses a buffered stream.
///
/// Line terminators (`\n` or `\r\n`) are stripped and invalid UTF-8 is
/// decoded lossily. A read error ends the scan early; lines read before it
/// are kept.
pub fn parse_reader<R: BufRead>(reader: R) -> Config {
    let mut config = Config::new();
    if let Err(e) = scan(reader, &mut config) {
        tracing::warn!("Stopped reading configuration: {}", e);
    }
    config
}

pub fn parse_str(input: &str) -> Config {
    parse_lines(input.lines())
}

/// Opens `path`, parses it and closes it again.
///
/// Failing to open or read the file is an error; its content is parsed
/// leniently.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let file = File::open(path)?;
    tracing::debug!(path = %path.display(), "Reading configuration file");

    let mut config = Config::new();
    scan(BufReader::new(file), &mut config)?;
    Ok(config)
}

// Applies every line of `reader` to `config`, stopping at the first read
// error.
fn scan<R: BufRead>(mut reader: R, config: &mut Config) -> io::Result<()> {
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(strip_terminator(&buf));
        apply_line(config, line_no, &line);
    }

    tracing::debug!(
        lines = line_no,
        settings = config.settings().len(),
        options = config.options().len(),
        "Parsed configuration"
    );
    Ok(())
}

fn strip_terminator(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

fn apply_line(config: &mut Config, line_no: usize, line: &str) {
    match classify_line(line) {
        LineKind::KeyValue { key, value } => {
            if let Some(previous) = config.insert_setting(key, value) {
                tracing::trace!(line = line_no, key, previous = %previous, "Overriding earlier value");
            }
        }
        LineKind::Option(name) => config.insert_option(name),
        LineKind::Comment | LineKind::Skip => {
            tracing::trace!(line = line_no, "Skipping line");
        }
    }
}
