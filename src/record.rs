//! Object records — one per non-blank, non-comment line of the body.
//!
//! # Line grammar
//! ```text
//! NAME  DOMAIN:ROLE  PRIORITY  LOCATION  DISPLAYNAME
//! ```
//! * `NAME` is matched as short as possible, so it may contain spaces
//!   (`white space std:label 1 white-space -`).
//! * `DOMAIN` has no whitespace and no colon; `ROLE` has no whitespace but may
//!   contain colons (`domain:role:colon`).
//! * `PRIORITY` is a signed integer.
//! * `LOCATION` has no whitespace and may be empty.
//! * `DISPLAYNAME` is the rest of the line.
//!
//! # Sentinels
//! A `LOCATION` ending in `$` stands for "this prefix plus the name", and a
//! `DISPLAYNAME` of exactly `-` stands for the name.  Both are expanded here,
//! once, so an [`ObjectRecord`] never holds a sentinel.

use std::sync::OnceLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::error::{strip_line_ending, InventoryError, Result};

const LOCATION_SENTINEL:     char = '$';
const DISPLAY_NAME_SENTINEL: &str = "-";

static RECORD_LINE: OnceLock<Regex> = OnceLock::new();

fn record_line_regex() -> &'static Regex {
    RECORD_LINE.get_or_init(|| {
        Regex::new(r"^(.+?)[[:space:]]+([^[:space:]:]+):([^[:space:]]+)[[:space:]]+(-?[0-9]+)[[:space:]]+?([^[:space:]]*)[[:space:]]+(.*)$")
            .expect("Invalid record line regex pattern")
    })
}

/// One documented object, with its URI and display name fully expanded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Together with `domain` and `role`, identifies the object.
    pub name:         String,
    pub domain:       String,
    pub role:         String,
    /// Opaque ranking hint; never interpreted here.
    pub priority:     i64,
    pub uri:          String,
    pub display_name: String,
}

/// Only ASCII whitespace separates fields; other spaces belong to them.
const BLANK: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Lines the body may contain that carry no record.
pub fn is_skippable(line: &str) -> bool {
    line.trim_matches(BLANK).is_empty() || line.starts_with('#')
}

/// Parse one record line (terminator allowed) and expand its sentinels
/// against `base_uri`.
pub fn parse_line(line: &str, base_uri: &str) -> Result<ObjectRecord> {
    let text = strip_line_ending(line);
    let malformed = || InventoryError::MalformedRecord { line: text.to_owned() };

    let caps = record_line_regex().captures(text).ok_or_else(malformed)?;
    let name     = &caps[1];
    let priority = parse_priority(&caps[4]);

    let location = expand_location(&caps[5], name);
    let display_name = match &caps[6] {
        DISPLAY_NAME_SENTINEL => name.to_owned(),
        other                 => other.to_owned(),
    };

    Ok(ObjectRecord {
        name:     name.to_owned(),
        domain:   caps[2].to_owned(),
        role:     caps[3].to_owned(),
        priority,
        uri:      format!("{base_uri}{location}"),
        display_name,
    })
}

/// Digits are guaranteed by the grammar; out-of-range values saturate.
fn parse_priority(digits: &str) -> i64 {
    digits.parse::<i64>().unwrap_or(if digits.starts_with('-') { i64::MIN } else { i64::MAX })
}

fn expand_location(location: &str, name: &str) -> String {
    match location.strip_suffix(LOCATION_SENTINEL) {
        Some(prefix) => format!("{prefix}{name}"),
        None         => location.to_owned(),
    }
}
