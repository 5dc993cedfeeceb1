//! Parser for the Sphinx `objects.inv` inventory format (version 2).
//!
//! An inventory maps documented objects (functions, terms, labels, ...) to
//! their location in a generated documentation site.  [`parse`] turns a byte
//! stream into an [`Inventory`]; [`InventoryParser`] exposes the header and
//! the lazily parsed records separately.

pub mod error;
pub mod stream;
pub mod header;
pub mod record;
pub mod inventory;
pub mod location;
pub mod parser;

pub use error::{ErrorKind, InventoryError, Result};
pub use stream::{InventoryStream, LineSource};
pub use header::InventoryHeader;
pub use record::ObjectRecord;
pub use inventory::Inventory;
pub use location::{FetchOptions, FileSystemResolver, ResourceResolver, DEFAULT_INVENTORY_PATH};
pub use parser::{parse, parse_from_location, parse_from_location_with, InventoryParser, Objects};
