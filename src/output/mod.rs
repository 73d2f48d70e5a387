//! Report formatting
//!
//! One line per reported node:
//! `<kind>;<<file>:<line>:<column>, line:<line>:<column>>`

use crate::parse::{Extent, NodeKind, SourcePosition};
use std::fmt;

/// Stands in for the file name of a range end, which is assumed to be in
/// the same file as its start
pub const END_FILE_TOKEN: &str = "line";

/// Range start: `<file>:<line>:<column>`
pub struct StartLocation<'a>(pub &'a SourcePosition);

impl fmt::Display for StartLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.0;
        if let Some(file) = &position.file {
            write!(f, "{}", file.display())?;
        }
        write!(f, ":{}:{}", position.line, position.column)
    }
}

/// Range end: `line:<line>:<column>`
pub struct EndLocation<'a>(pub &'a SourcePosition);

impl fmt::Display for EndLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", END_FILE_TOKEN, self.0.line, self.0.column)
    }
}

/// A reported node, written out as soon as it is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: NodeKind,
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl ReportLine {
    pub fn new(kind: NodeKind, extent: Extent) -> Self {
        Self {
            kind,
            start: extent.start,
            end: extent.end,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};<{}, {}>",
            self.kind.label(),
            StartLocation(&self.start),
            EndLocation(&self.end)
        )
    }
}
