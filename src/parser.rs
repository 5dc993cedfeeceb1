//! Driver — header, then records, folded into an [`Inventory`].
//!
//! ```no_run
//! use std::fs::File;
//! use sphinx_inventory::{InventoryParser, parse_from_location};
//!
//! // One call: open `<root>/objects.inv`, use `<root>/` as the URI base.
//! let inventory = parse_from_location("target/doc", "objects.inv")?;
//! println!("{} objects", inventory.len());
//!
//! // Split access: header first, then pull records one at a time.
//! let mut file = File::open("objects.inv")?;
//! let mut parser = InventoryParser::from_reader(&mut file);
//! let header = parser.parse_header()?;
//! for object in parser.parse_objects(&header, "https://example.org/")?.take(10) {
//!     println!("{}", object?.uri);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Errors from either stage pass through untouched; the caller keeps
//! ownership of the byte source and closes it, on success or failure.

use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use log::{debug, info, trace};
use crate::error::{InventoryError, Result};
use crate::header::{self, InventoryHeader, SUPPORTED_VERSION};
use crate::inventory::Inventory;
use crate::location::{FetchOptions, FileSystemResolver, ResourceResolver};
use crate::record::{self, ObjectRecord};
use crate::stream::{InventoryStream, LineSource};

// ── InventoryParser ───────────────────────────────────────────────────────────

pub struct InventoryParser<S: LineSource> {
    stream: S,
}

impl<R: Read> InventoryParser<InventoryStream<BufReader<R>>> {
    pub fn from_reader(reader: R) -> Self {
        Self::new(InventoryStream::from_reader(reader))
    }
}

impl<S: LineSource> InventoryParser<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Parse header and records into an indexed [`Inventory`].
    ///
    /// `base_uri` is prepended to every object location.
    pub fn parse(&mut self, base_uri: &str) -> Result<Inventory> {
        let header = self.parse_header()?;
        let mut inventory = Inventory::new(header.project_name.clone(), header.project_version.clone());
        for object in self.parse_objects(&header, base_uri)? {
            inventory.add_object(object?);
        }
        debug!(
            "parsed inventory {:?} {:?}: {} objects in {} domains",
            inventory.project, inventory.version, inventory.len(), inventory.domains().count()
        );
        Ok(inventory)
    }

    /// Consume only the header, leaving the stream at the decompressed body.
    pub fn parse_header(&mut self) -> Result<InventoryHeader> {
        header::parse(&mut self.stream)
    }

    /// Lazily parse the body.  Assumes the stream holds nothing but records:
    /// call [`parse_header`](Self::parse_header) first on a full inventory.
    ///
    /// The version in `header` is checked before anything is read.
    pub fn parse_objects(&mut self, header: &InventoryHeader, base_uri: &str) -> Result<Objects<'_, S>> {
        if header.format_version != SUPPORTED_VERSION {
            return Err(InventoryError::UnsupportedVersion(header.format_version));
        }
        Ok(Objects {
            stream:   &mut self.stream,
            base_uri: base_uri.to_owned(),
            done:     false,
        })
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

// ── Objects ───────────────────────────────────────────────────────────────────

/// Forward-only, single-pass sequence of records.
///
/// Each `next()` reads just enough lines to produce one record.  The first
/// error ends the sequence.
pub struct Objects<'a, S: LineSource> {
    stream:   &'a mut S,
    base_uri: String,
    done:     bool,
}

impl<'a, S: LineSource> Iterator for Objects<'a, S> {
    type Item = Result<ObjectRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.stream.read_line(None) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(InventoryError::StreamReadFailure(e)));
                }
            };

            if record::is_skippable(&line) {
                trace!("skipping line {:?}", line);
                continue;
            }

            let result = record::parse_line(&line, &self.base_uri);
            match &result {
                Ok(object) => trace!("parsed {}:{} {:?}", object.domain, object.role, object.name),
                Err(_)     => self.done = true,
            }
            return Some(result);
        }
        None
    }
}

impl<'a, S: LineSource> FusedIterator for Objects<'a, S> {}

// ── Convenience entry points ──────────────────────────────────────────────────

/// Parse a whole inventory from `reader`.  Pass `&mut reader` to keep it.
pub fn parse<R: Read>(reader: R, base_uri: &str) -> Result<Inventory> {
    InventoryParser::from_reader(reader).parse(base_uri)
}

/// Open `<root_uri>/<relative_path>` on the filesystem and parse it, using
/// `<root_uri>/` as the URI base.
pub fn parse_from_location(root_uri: &str, relative_path: &str) -> Result<Inventory> {
    parse_from_location_with(&FileSystemResolver, root_uri, &FetchOptions::with_path(relative_path))
}

/// Like [`parse_from_location`], with a custom resolver and options.
///
/// A resolver failure becomes [`InventoryError::ResourceUnavailable`]; there
/// is no retry.
pub fn parse_from_location_with<L: ResourceResolver + ?Sized>(
    resolver: &L,
    root_uri: &str,
    options:  &FetchOptions,
) -> Result<Inventory> {
    let (location, base_uri) = options.resolve(root_uri);
    let reader = resolver.open(&location)
        .map_err(|source| InventoryError::ResourceUnavailable { location: location.clone(), source })?;
    info!("parsing inventory from {}", location);
    parse(reader, &base_uri)
}
