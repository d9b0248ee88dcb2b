//! Error types for parsing and lookups

use winnow::error::ContextError;

use crate::parser::RawLine;

/// The kind of entry a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum EntryKind {
    #[strum(to_string = "Vendor")]
    Vendor,
    #[strum(to_string = "Device")]
    Device,
    #[strum(to_string = "Sub-device")]
    SubDevice,
    #[strum(to_string = "Class")]
    Class,
    #[strum(to_string = "Subclass")]
    Subclass,
    #[strum(to_string = "Programming interface")]
    ProgrammingInterface,
    #[strum(to_string = "Protocol")]
    Protocol,
    #[strum(to_string = "Audio terminal")]
    AudioTerminal,
    #[strum(to_string = "HID descriptor")]
    Hid,
    #[strum(to_string = "HID item")]
    HidItem,
    #[strum(to_string = "Physical bias")]
    PhysicalBias,
    #[strum(to_string = "Physical descriptor")]
    PhysicalDescriptor,
    #[strum(to_string = "HID usage page")]
    HidUsagePage,
    #[strum(to_string = "HID usage")]
    HidUsage,
    #[strum(to_string = "Language")]
    Language,
    #[strum(to_string = "Dialect")]
    Dialect,
    #[strum(to_string = "Country code")]
    CountryCode,
    #[strum(to_string = "Video terminal")]
    VideoTerminal,
}

/// A lookup that didn't match anything
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NotFound {
    /// No entry of the kind with the given ID exists where we looked
    #[error("{kind} ID {id:04x} not found.")]
    Missing { kind: EntryKind, id: u32 },
    /// The parent exists but has no children at all
    #[error("{parent_kind} ID {parent_id:04x} doesn't have any {kind} entries.")]
    NoChildren {
        parent_kind: EntryKind,
        parent_id: u32,
        kind: EntryKind,
    },
}

/// Top level error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("Malformed ID database: {0}")]
    MalformedInput(#[from] ParseError),
}

impl Error {
    /// True if this is a lookup miss rather than a broken database
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A line of the database that could not be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    line_number: usize,
    column: usize,
    line: String,
}

impl ParseError {
    pub(crate) fn from_parse<'input>(
        error: &winnow::error::ParseError<&'input str, ContextError>,
        line: &RawLine<'input>,
    ) -> Self {
        let mut message = error.inner().to_string();
        if message.is_empty() {
            message = "unexpected content".to_owned();
        }
        Self {
            message,
            line_number: line.number,
            column: error.offset(),
            line: line.text.to_owned(),
        }
    }

    /// A line that is valid on its own but has no parent to attach to
    pub(crate) fn orphan(line: &RawLine<'_>, kind: EntryKind, parent: EntryKind) -> Self {
        Self {
            message: format!("{kind} entry without a preceding {parent} entry"),
            line_number: line.number,
            column: 0,
            line: line.text.to_owned(),
        }
    }

    /// 1-based line number in the input
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 0-based byte column in the line
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Tabs are shown as single spaces so that the caret lines up
        write!(
            f,
            "Error at line {}, column {}: {}\n{}\n{}^",
            self.line_number,
            self.column,
            self.message,
            self.line.replace('\t', " "),
            " ".repeat(self.column)
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_not_found_messages() {
        let err = NotFound::Missing {
            kind: EntryKind::Device,
            id: 0x1234,
        };
        assert_eq!(err.to_string(), "Device ID 1234 not found.");

        let err = NotFound::NoChildren {
            parent_kind: EntryKind::Vendor,
            parent_id: 0x8086,
            kind: EntryKind::Device,
        };
        assert_eq!(
            err.to_string(),
            "Vendor ID 8086 doesn't have any Device entries."
        );
    }

    #[test]
    fn test_orphan_display() {
        let line = RawLine {
            number: 7,
            text: "\t1234  Orphan",
        };
        let err = ParseError::orphan(&line, EntryKind::Device, EntryKind::Vendor);
        assert_eq!(err.line_number(), 7);
        assert_eq!(
            err.to_string(),
            "Error at line 7, column 0: Device entry without a preceding Vendor entry\n 1234  Orphan\n^"
        );
    }

    #[test]
    fn test_is_not_found() {
        let err: Error = NotFound::Missing {
            kind: EntryKind::Class,
            id: 3,
        }
        .into();
        assert!(err.is_not_found());
    }
}
