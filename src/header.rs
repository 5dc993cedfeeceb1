//! Inventory header — the four plain-text lines in front of the zlib body.
//!
//! ```text
//! # Sphinx inventory version 2
//! # Project: <name>
//! # Version: <version>
//! # The remainder of this file is compressed using zlib.
//! ```
//!
//! Only version 2 is understood.  An unknown version is reported as
//! [`InventoryError::UnsupportedVersion`], never as a malformed header, so a
//! caller can tell "not an inventory" apart from "an inventory from the future".

use std::sync::OnceLock;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::error::{strip_line_ending, InventoryError, Result};
use crate::stream::LineSource;

/// The only inventory format version this crate parses.
pub const SUPPORTED_VERSION: i64 = 2;

/// Buffer size for the first line, terminator slot included: at most
/// `FIRST_LINE_LIMIT - 1` bytes of it are consumed.
pub const FIRST_LINE_LIMIT: usize = 32;

const PROJECT_MARKER: &str = "# Project: ";
const VERSION_MARKER: &str = "# Version: ";
const ZLIB_MARKER:    &str = "zlib";

static VERSION_LINE: OnceLock<Regex> = OnceLock::new();

fn version_line_regex() -> &'static Regex {
    VERSION_LINE.get_or_init(|| {
        Regex::new(r"^#[[:space:]]*Sphinx[[:space:]]*inventory[[:space:]]*version[[:space:]]*([+-]?[0-9]+)")
            .expect("Invalid inventory version regex pattern")
    })
}

/// Metadata of an inventory.
///
/// Usually obtained from [`parse`], but it can be built by hand to parse a
/// bare decompressed body with `InventoryParser::parse_objects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryHeader {
    pub format_version:  i64,
    pub project_name:    String,
    pub project_version: String,
}

impl InventoryHeader {
    pub fn new(
        format_version:  i64,
        project_name:    impl Into<String>,
        project_version: impl Into<String>,
    ) -> Self {
        Self {
            format_version,
            project_name:    project_name.into(),
            project_version: project_version.into(),
        }
    }
}

impl Default for InventoryHeader {
    fn default() -> Self {
        Self::new(SUPPORTED_VERSION, "", "")
    }
}

/// Consume the header lines and leave `stream` inflating the body.
pub fn parse<S: LineSource + ?Sized>(stream: &mut S) -> Result<InventoryHeader> {
    let first = read_required(stream, Some(FIRST_LINE_LIMIT - 1))?;
    let format_version = version_line_regex()
        .captures(&first)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .ok_or_else(|| malformed("first line is not a valid Sphinx inventory version string", &first))?;

    let header = match format_version {
        SUPPORTED_VERSION => parse_v2(stream)?,
        other             => return Err(InventoryError::UnsupportedVersion(other)),
    };

    debug!(
        "parsed inventory header: version={}, project={:?}, project_version={:?}",
        header.format_version, header.project_name, header.project_version
    );
    Ok(header)
}

fn parse_v2<S: LineSource + ?Sized>(stream: &mut S) -> Result<InventoryHeader> {
    let line = read_required(stream, None)?;
    let project_name = marker_value(&line, PROJECT_MARKER)
        .ok_or_else(|| malformed("second line is not a valid Project string", &line))?;

    let line = read_required(stream, None)?;
    let project_version = marker_value(&line, VERSION_MARKER)
        .ok_or_else(|| malformed("third line is not a valid Version string", &line))?;

    let line = read_required(stream, None)?;
    if !line.contains(ZLIB_MARKER) {
        return Err(malformed("fourth line does not advertise zlib compression", &line));
    }

    stream.enable_inflate();
    Ok(InventoryHeader::new(SUPPORTED_VERSION, project_name, project_version))
}

/// Everything after the first `marker` up to the line terminator; may be empty.
fn marker_value<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let line = strip_line_ending(line);
    line.find(marker).map(|at| &line[at + marker.len()..])
}

fn read_required<S: LineSource + ?Sized>(stream: &mut S, max_len: Option<usize>) -> Result<String> {
    match stream.read_line(max_len) {
        Ok(Some(line)) => Ok(line),
        Ok(None)       => Err(InventoryError::UnexpectedEndOfStream),
        Err(e)         => Err(InventoryError::StreamReadFailure(e)),
    }
}

fn malformed(reason: &'static str, line: &str) -> InventoryError {
    InventoryError::MalformedHeader { reason, line: strip_line_ending(line).to_owned() }
}
