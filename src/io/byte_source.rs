//! Byte-range sources for strip data
//!
//! The strip reader only ever asks for one contiguous block per strip, so a
//! source is anything that can hand back `length` bytes starting at `offset`.

use std::fs::File;
use std::io::{BufReader, SeekFrom};
use std::path::Path;

use log::{debug, trace};

use crate::io::seekable::{stream_len, SeekableReader};
use crate::tiff::errors::{TiffError, TiffResult};

/// Supplies raw file bytes by range
pub trait ByteSource {
    /// Read `length` bytes starting at `offset`
    ///
    /// Fails with `SourceReadError` if the range exceeds the source.
    fn get_block(&mut self, offset: u64, length: u64) -> TiffResult<Vec<u8>>;

    /// Total size of the source in bytes
    fn len(&mut self) -> TiffResult<u64>;

    /// Whether the source holds no bytes at all
    fn is_empty(&mut self) -> TiffResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn out_of_range(offset: u64, length: u64, available: u64) -> TiffError {
    TiffError::SourceReadError {
        offset,
        length,
        available,
        location: None,
    }
}

/// Byte source over an in-memory buffer
#[derive(Debug, Clone)]
pub struct ByteSourceArray {
    bytes: Vec<u8>,
}

impl ByteSourceArray {
    /// Create a source that owns `bytes`
    pub fn new(bytes: Vec<u8>) -> Self {
        ByteSourceArray { bytes }
    }
}

impl From<Vec<u8>> for ByteSourceArray {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSourceArray::new(bytes)
    }
}

impl ByteSource for ByteSourceArray {
    fn get_block(&mut self, offset: u64, length: u64) -> TiffResult<Vec<u8>> {
        let available = self.bytes.len() as u64;
        let end = offset.checked_add(length)
            .filter(|end| *end <= available)
            .ok_or_else(|| out_of_range(offset, length, available))?;

        trace!("Reading {} bytes at offset {} from memory", length, offset);
        Ok(self.bytes[offset as usize..end as usize].to_vec())
    }

    fn len(&mut self) -> TiffResult<u64> {
        Ok(self.bytes.len() as u64)
    }
}

/// Byte source over any seekable reader (typically a file)
pub struct ByteSourceFile<R: SeekableReader> {
    reader: R,
    /// Cached stream length
    size: Option<u64>,
}

impl ByteSourceFile<BufReader<File>> {
    /// Open a file as a byte source
    ///
    /// # Arguments
    /// * `path` - Path to the TIFF file
    pub fn open<P: AsRef<Path>>(path: P) -> TiffResult<Self> {
        let path = path.as_ref();
        debug!("Opening byte source: {}", path.display());
        let file = File::open(path)?;
        Ok(ByteSourceFile::new(BufReader::with_capacity(1024 * 1024, file))) // 1MB buffer
    }
}

impl<R: SeekableReader> ByteSourceFile<R> {
    /// Wrap a seekable reader
    pub fn new(reader: R) -> Self {
        ByteSourceFile { reader, size: None }
    }

    /// Return the wrapped reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: SeekableReader> ByteSource for ByteSourceFile<R> {
    fn get_block(&mut self, offset: u64, length: u64) -> TiffResult<Vec<u8>> {
        let available = self.len()?;
        match offset.checked_add(length) {
            Some(end) if end <= available => {}
            _ => return Err(out_of_range(offset, length, available)),
        }

        trace!("Reading {} bytes at offset {} from stream", length, offset);
        self.reader.seek(SeekFrom::Start(offset))?;
        let mut block = vec![0u8; length as usize];
        self.reader.read_exact(&mut block).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                out_of_range(offset, length, available)
            } else {
                TiffError::IoError(e)
            }
        })?;

        Ok(block)
    }

    fn len(&mut self) -> TiffResult<u64> {
        if let Some(size) = self.size {
            return Ok(size);
        }
        let size = stream_len(&mut self.reader)?;
        self.size = Some(size);
        Ok(size)
    }
}
