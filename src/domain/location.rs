use crate::domain::error::{ToolError, ToolResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A position inside a source file, as reported by the oracle (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(path: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

/// Parse a `path<delim>line<delim>column` string.
///
/// The last two segments are the line and column; everything before them is
/// the path, rejoined with the delimiter so that paths containing it
/// (`C:\src\main.go:3:1`) survive.
pub fn parse_path_line_column(s: &str, delimiter: &str) -> ToolResult<SourceLocation> {
    let mut segments = s.rsplitn(3, delimiter);
    let column = segments.next();
    let line = segments.next();
    let path = segments.next();

    let (Some(path), Some(line), Some(column)) = (path, line, column) else {
        return Err(ToolError::malformed(format!(
            "Invalid source position, expected path{delimiter}line{delimiter}column: {s:?}"
        )));
    };
    if path.is_empty() {
        return Err(ToolError::malformed(format!(
            "Invalid source position, empty path: {s:?}"
        )));
    }

    Ok(SourceLocation {
        path: PathBuf::from(path),
        line: parse_position_number(line, "line", s)?,
        column: parse_position_number(column, "column", s)?,
    })
}

fn parse_position_number(segment: &str, what: &str, whole: &str) -> ToolResult<u32> {
    // Plain decimal digits only; `str::parse` would also take a leading `+`.
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ToolError::malformed(format!(
            "Invalid {what} number {segment:?} in source position: {whole:?}"
        )));
    }
    match segment.parse::<u32>() {
        Ok(0) => Err(ToolError::malformed(format!(
            "Invalid {what} number 0 in source position: {whole:?}"
        ))),
        Ok(n) => Ok(n),
        Err(e) => Err(ToolError::malformed_with(
            format!("Invalid {what} number {segment:?} in source position: {whole:?}"),
            e,
        )),
    }
}
