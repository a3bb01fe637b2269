//! Handler for PackBits compressed data
//!
//! PackBits is the byte-oriented run-length scheme from Apple's MacPaint,
//! adopted as TIFF compression 32773.

use log::debug;

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// PackBits compression handler (compression code 32773)
///
/// Each run starts with a signed header byte:
/// - `0..=127`: copy the next `header + 1` bytes literally
/// - `-127..=-1`: repeat the next byte `1 - header` times
/// - `-128`: no operation
pub struct PackBitsHandler;

impl CompressionHandler for PackBitsHandler {
    fn decompress(&self, data: &[u8], limit: usize) -> TiffResult<Vec<u8>> {
        let mut output = Vec::with_capacity((data.len() * 2).min(limit));
        let mut pos = 0;

        while pos < data.len() && output.len() < limit {
            let header = data[pos] as i8;
            pos += 1;

            match header {
                -128 => continue,

                0..=127 => {
                    let count = header as usize + 1;
                    if pos + count > data.len() {
                        return Err(TiffError::decompression(format!(
                            "PackBits: literal run of {} bytes at {} exceeds input", count, pos - 1
                        )));
                    }
                    let take = count.min(limit - output.len());
                    output.extend_from_slice(&data[pos..pos + take]);
                    pos += count;
                }

                -127..=-1 => {
                    let byte = *data.get(pos).ok_or_else(|| {
                        TiffError::decompression("PackBits: missing run byte")
                    })?;
                    pos += 1;
                    let count = (1 - header as isize) as usize;
                    output.resize((output.len() + count).min(limit), byte);
                }
            }
        }

        debug!("PackBits expanded {} bytes to {}", data.len(), output.len());
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "PackBits"
    }

    fn code(&self) -> u16 {
        compression::PACKBITS
    }
}
