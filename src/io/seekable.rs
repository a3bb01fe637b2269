//! Seekable reader trait and implementations
//!
//! This module provides a unified trait for readers that support both
//! reading and seeking operations.

use std::io::{Read, Seek, SeekFrom};

use log::warn;

/// Trait for readers that can both read and seek
///
/// This trait combines the Read and Seek traits for use with
/// the file-backed byte source.
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}

/// Gets the total size of a seekable stream
///
/// The stream position is restored afterwards. If the end cannot be
/// located, `u64::MAX` is returned and range checks fall back to the
/// read itself failing.
pub fn stream_len(reader: &mut dyn SeekableReader) -> std::io::Result<u64> {
    let current_position = reader.stream_position()?;
    let size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => size,
        Err(e) => {
            warn!("Could not determine stream size: {}", e);
            u64::MAX
        }
    };
    reader.seek(SeekFrom::Start(current_position))?;
    Ok(size)
}
