//! # Database File Format
//!
//! One project per line, UTF-8, two fields separated by `;`:
//!
//! ```text
//! /home/user/code/gitcd;42
//! /home/user/code/dotfiles;3
//! ```
//!
//! There is no header and no escaping. A path containing `;` cannot be
//! stored faithfully: everything after the first `;` is read as the counter
//! field. Changing that would change the on-disk format.

use super::store::Project;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Field separator between path and usage count
pub const FIELD_SEPARATOR: char = ';';

/// Reason a database line could not be turned into a [`Project`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    /// Fewer than two `;`-separated fields
    MissingField,
    /// Second field is not a non-negative integer
    InvalidCount(String),
    /// First field is empty
    EmptyPath,
    /// Line bytes are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "malformed entry"),
            Self::InvalidCount(count) => write!(f, "invalid call count '{}'", count),
            Self::EmptyPath => write!(f, "empty project path"),
            Self::InvalidUtf8 => write!(f, "entry is not valid UTF-8"),
        }
    }
}

/// Render a project as a database line (without the trailing newline)
pub fn encode_record(project: &Project) -> String {
    format!(
        "{}{}{}",
        project.path, FIELD_SEPARATOR, project.usage_count
    )
}

/// Parse one database line
///
/// Fields beyond the second are ignored.
pub fn decode_line(line: &str) -> Result<Project, MalformedRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.split(FIELD_SEPARATOR);

    let path = fields.next().unwrap_or_default();
    let count = fields.next().ok_or(MalformedRecord::MissingField)?;

    let usage_count = count
        .parse::<u64>()
        .map_err(|_| MalformedRecord::InvalidCount(count.to_string()))?;

    if path.is_empty() {
        return Err(MalformedRecord::EmptyPath);
    }

    Ok(Project {
        path: path.to_string(),
        usage_count,
    })
}

/// One line of a database file, as seen by the reader
#[derive(Debug)]
pub(crate) enum Line {
    Blank,
    Record(Project),
    Malformed {
        number: usize,
        content: String,
        reason: MalformedRecord,
    },
}

/// Read every line from `reader`, classifying each one
///
/// Only I/O failures are returned as errors; content problems come back as
/// [`Line::Malformed`] so the caller can skip them.
pub(crate) fn read_lines<R: BufRead>(mut reader: R) -> io::Result<Vec<Line>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(text) => text,
            Err(_) => {
                lines.push(Line::Malformed {
                    number,
                    content: String::from_utf8_lossy(&buf).into_owned(),
                    reason: MalformedRecord::InvalidUtf8,
                });
                continue;
            }
        };

        if line.trim().is_empty() {
            lines.push(Line::Blank);
            continue;
        }

        match decode_line(line) {
            Ok(project) => lines.push(Line::Record(project)),
            Err(reason) => lines.push(Line::Malformed {
                number,
                content: line.to_string(),
                reason,
            }),
        }
    }

    Ok(lines)
}

/// Write every project as one line each, newline-terminated
pub(crate) fn write_records<'a, W, I>(mut writer: W, projects: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Project>,
{
    for project in projects {
        writeln!(writer, "{}", encode_record(project))?;
    }
    writer.flush()
}
