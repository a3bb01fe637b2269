//! Compression handler trait definition

use log::warn;

use crate::tiff::errors::{TiffError, TiffResult};

/// Strategy trait for handling different compression methods
pub trait CompressionHandler: Send + Sync {
    /// Decompress the data
    ///
    /// # Arguments
    /// * `data` - Compressed bytes of one strip
    /// * `limit` - Maximum number of bytes to produce; decoding stops there
    fn decompress(&self, data: &[u8], limit: usize) -> TiffResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Get the compression code
    fn code(&self) -> u16;

    /// Decompress a strip to exactly `expected_len` bytes
    ///
    /// The codec is asked for one byte more than expected so surplus output
    /// can be detected without inflating the rest of the stream. Short output
    /// is a `DecompressionError`. Surplus output (padding some encoders
    /// append) is dropped.
    fn decompress_to_length(&self, data: &[u8], expected_len: usize) -> TiffResult<Vec<u8>> {
        let mut decompressed = self.decompress(data, expected_len.saturating_add(1))?;

        if decompressed.len() < expected_len {
            return Err(TiffError::decompression(format!(
                "{} produced {} bytes, expected {}",
                self.name(), decompressed.len(), expected_len
            )));
        }

        if decompressed.len() > expected_len {
            warn!("{} produced more than {} bytes, truncating",
                  self.name(), expected_len);
            decompressed.truncate(expected_len);
        }

        Ok(decompressed)
    }
}
