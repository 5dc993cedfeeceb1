//! Error type shared by every stage of an inventory parse.
//!
//! Each variant is one error kind.  Kinds never overlap, so a caller can tell
//! a broken header from a broken record from a broken transport by matching
//! on the variant (or on [`InventoryError::kind`]) instead of on the message.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    /// A required header line could not be read at all.
    #[error("unexpected end of file")]
    UnexpectedEndOfStream,

    /// A header line was read but did not match its pattern.
    /// `line` is the raw line with its terminator stripped.
    #[error("{reason}: '{line}'")]
    MalformedHeader { reason: &'static str, line: String },

    /// The version number parsed, but this build only understands version 2.
    #[error("unsupported Sphinx inventory version: {0}")]
    UnsupportedVersion(i64),

    /// An object line did not match the six-field record grammar.
    #[error("object string did not match pattern: '{line}'")]
    MalformedRecord { line: String },

    /// The underlying read failed for a reason other than a clean end of stream
    /// (transport error, corrupt zlib data, ...).
    #[error("could not read until end of stream: {0}")]
    StreamReadFailure(#[source] io::Error),

    /// The resolver behind `parse_from_location` could not open the inventory.
    #[error("could not open file: {location}: {source}")]
    ResourceUnavailable {
        location: String,
        #[source]
        source:   io::Error,
    },
}

/// Fieldless discriminant of [`InventoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexpectedEndOfStream,
    MalformedHeader,
    UnsupportedVersion,
    MalformedRecord,
    StreamReadFailure,
    ResourceUnavailable,
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::UnexpectedEndOfStream      => ErrorKind::UnexpectedEndOfStream,
            InventoryError::MalformedHeader { .. }     => ErrorKind::MalformedHeader,
            InventoryError::UnsupportedVersion(_)      => ErrorKind::UnsupportedVersion,
            InventoryError::MalformedRecord { .. }     => ErrorKind::MalformedRecord,
            InventoryError::StreamReadFailure(_)       => ErrorKind::StreamReadFailure,
            InventoryError::ResourceUnavailable { .. } => ErrorKind::ResourceUnavailable,
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

/// Strip the line terminator (LF or CRLF) the way error messages quote lines.
pub(crate) fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(&['\n', '\r'][..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_quote_the_offending_line() {
        let err = InventoryError::MalformedHeader {
            reason: "second line is not a valid Project string",
            line:   "# Invalid Project: CLUB1".into(),
        };
        assert_eq!(
            err.to_string(),
            "second line is not a valid Project string: '# Invalid Project: CLUB1'"
        );
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    }

    #[test]
    fn test_stream_failure_carries_low_level_text() {
        let err = InventoryError::StreamReadFailure(io::Error::new(
            io::ErrorKind::InvalidData,
            "corrupt deflate stream",
        ));
        assert_eq!(err.to_string(), "could not read until end of stream: corrupt deflate stream");
        assert_eq!(err.kind(), ErrorKind::StreamReadFailure);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("abc\r\n"), "abc");
        assert_eq!(strip_line_ending("abc\n"),   "abc");
        assert_eq!(strip_line_ending("abc  "),   "abc  ");
    }
}
