//! Resource acquisition for [`parse_from_location`](crate::parse_from_location).
//!
//! Opening the byte source is not the parser's job.  A [`ResourceResolver`]
//! turns a location string into a reader; the crate ships a filesystem one
//! and callers plug in their own (an HTTP client, an archive, ...).

use std::fs::File;
use std::io::{self, Read};

/// Where an inventory sits relative to its documentation root.
pub const DEFAULT_INVENTORY_PATH: &str = "objects.inv";

// ── FetchOptions ──────────────────────────────────────────────────────────────

/// Configuration for `parse_from_location_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Inventory path, appended to the normalised root.
    pub inventory_path: String,
    /// Prefix for every object URI.  `None` uses the normalised root, which
    /// is right whenever the inventory is served next to its documentation.
    pub base_uri:       Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            inventory_path: DEFAULT_INVENTORY_PATH.to_owned(),
            base_uri:       None,
        }
    }
}

impl FetchOptions {
    pub fn with_path(inventory_path: impl Into<String>) -> Self {
        Self { inventory_path: inventory_path.into(), ..Self::default() }
    }

    /// `(location to open, base URI for objects)` for a documentation root.
    pub fn resolve(&self, root_uri: &str) -> (String, String) {
        let root = normalize_root(root_uri);
        let location = format!("{root}{}", self.inventory_path);
        let base_uri = self.base_uri.clone().unwrap_or(root);
        (location, base_uri)
    }
}

/// Append the trailing `/` a documentation root needs, unless it is empty.
pub fn normalize_root(root_uri: &str) -> String {
    if root_uri.is_empty() || root_uri.ends_with('/') {
        root_uri.to_owned()
    } else {
        format!("{root_uri}/")
    }
}

// ── Resolvers ─────────────────────────────────────────────────────────────────

pub trait ResourceResolver {
    type Reader: Read;

    fn open(&self, location: &str) -> io::Result<Self::Reader>;
}

/// Treats locations as filesystem paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemResolver;

impl ResourceResolver for FileSystemResolver {
    type Reader = File;

    fn open(&self, location: &str) -> io::Result<File> {
        File::open(location)
    }
}
