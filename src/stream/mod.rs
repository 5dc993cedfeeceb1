//! Line-oriented byte source with an in-place switch to zlib inflation.
//!
//! # Layout of an inventory stream
//! An `objects.inv` file is four plain-text header lines followed by one
//! zlib stream.  [`InventoryStream`] starts in plain mode, hands out header
//! lines one by one, and on [`LineSource::enable_inflate`] wraps the *same*
//! buffered reader in a zlib decoder.  Bytes already buffered by the plain
//! reader are therefore never lost across the switch.
//!
//! # Framing
//! The body uses zlib framing (RFC 1950 header, full 15-bit window, Adler-32
//! trailer), not raw deflate.  The switch is one-way: there is no going back
//! to plain reads and the stream cannot be rewound afterwards.
//!
//! # Ownership
//! The stream only reads.  Closing the underlying handle is left to whoever
//! owns it; use [`InventoryStream::into_inner`] to get it back.

use std::io::{self, BufRead, BufReader, Read};
use flate2::bufread::ZlibDecoder;
use log::debug;

// ── LineSource trait ─────────────────────────────────────────────────────────

/// The two capabilities the parser needs from a byte source.
pub trait LineSource {
    /// Read the next line, terminator included.
    ///
    /// When `max_len` is set, at most that many bytes are consumed even if no
    /// newline was found.  Returns `Ok(None)` on a clean end of stream.
    fn read_line(&mut self, max_len: Option<usize>) -> io::Result<Option<String>>;

    /// Inflate every subsequent read.  Calling this twice is a no-op.
    fn enable_inflate(&mut self);
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn read_line(&mut self, max_len: Option<usize>) -> io::Result<Option<String>> {
        (**self).read_line(max_len)
    }

    fn enable_inflate(&mut self) {
        (**self).enable_inflate()
    }
}

// ── InventoryStream ──────────────────────────────────────────────────────────

enum Stage<R: BufRead> {
    Plain(R),
    Inflate(BufReader<ZlibDecoder<R>>),
    /// Only observable if a stage switch was interrupted.
    Detached,
}

pub struct InventoryStream<R: BufRead> {
    stage: Stage<R>,
}

impl<R: Read> InventoryStream<BufReader<R>> {
    /// Wrap an unbuffered reader (a `File`, a socket, ...).
    pub fn from_reader(reader: R) -> Self {
        Self::plain(BufReader::new(reader))
    }
}

impl<R: BufRead> InventoryStream<R> {
    /// Start in plain mode, positioned at the header.
    pub fn plain(reader: R) -> Self {
        Self { stage: Stage::Plain(reader) }
    }

    /// Start in inflate mode, for a bare zlib body without a header.
    pub fn inflated(reader: R) -> Self {
        let mut stream = Self::plain(reader);
        stream.enable_inflate();
        stream
    }

    pub fn is_inflating(&self) -> bool {
        matches!(self.stage, Stage::Inflate(_))
    }

    /// Give the underlying reader back.  Any buffered but unread bytes are lost.
    pub fn into_inner(self) -> Option<R> {
        match self.stage {
            Stage::Plain(r)   => Some(r),
            Stage::Inflate(r) => Some(r.into_inner().into_inner()),
            Stage::Detached   => None,
        }
    }
}

impl<R: BufRead> LineSource for InventoryStream<R> {
    fn read_line(&mut self, max_len: Option<usize>) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let n = match &mut self.stage {
            Stage::Plain(r)   => read_until_newline(r, max_len, &mut buf)?,
            Stage::Inflate(r) => read_until_newline(r, max_len, &mut buf)?,
            Stage::Detached   => {
                return Err(io::Error::new(io::ErrorKind::Other, "stream detached from its reader"));
            }
        };
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn enable_inflate(&mut self) {
        self.stage = match std::mem::replace(&mut self.stage, Stage::Detached) {
            Stage::Plain(r) => {
                debug!("switching inventory stream to zlib inflation");
                Stage::Inflate(BufReader::new(ZlibDecoder::new(r)))
            }
            other => other,
        };
    }
}

fn read_until_newline<B: BufRead>(
    reader:  &mut B,
    max_len: Option<usize>,
    buf:     &mut Vec<u8>,
) -> io::Result<usize> {
    match max_len {
        Some(max) => reader.by_ref().take(max as u64).read_until(b'\n', buf),
        None      => reader.read_until(b'\n', buf),
    }
}
