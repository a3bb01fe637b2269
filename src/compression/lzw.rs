//! Handler for LZW compressed data
//!
//! TIFF LZW writes codes MSB first, starting at 9 bits and growing to 12.
//! The code width grows one code early compared to GIF ("early change"),
//! which `weezl` calls the TIFF size switch.

use log::{debug, trace};
use weezl::decode::Decoder;
use weezl::{BitOrder, LzwStatus};

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// Output is produced in chunks of this size until the limit is reached
const CHUNK_SIZE: usize = 64 * 1024;

/// LZW compression handler (compression code 5)
pub struct LzwHandler;

impl CompressionHandler for LzwHandler {
    fn decompress(&self, data: &[u8], limit: usize) -> TiffResult<Vec<u8>> {
        let mut decoder = Decoder::with_tiff_size_switch(BitOrder::Msb, 8);
        let mut output = Vec::new();
        let mut chunk = vec![0u8; CHUNK_SIZE.min(limit)];
        let mut input = data;

        while output.len() < limit {
            let wanted = (limit - output.len()).min(chunk.len());
            let result = decoder.decode_bytes(input, &mut chunk[..wanted]);
            input = &input[result.consumed_in..];
            output.extend_from_slice(&chunk[..result.consumed_out]);

            match result.status {
                Ok(LzwStatus::Done) => break,
                // A missing EOI code is tolerated: many writers simply stop
                Ok(LzwStatus::NoProgress) => {
                    trace!("LZW stream ended without EOI at output byte {}", output.len());
                    break;
                }
                Ok(LzwStatus::Ok) => {
                    if result.consumed_in == 0 && result.consumed_out == 0 {
                        break;
                    }
                }
                Err(e) => {
                    return Err(TiffError::decompression(format!(
                        "LZW: {} after {} output bytes", e, output.len()
                    )));
                }
            }
        }

        debug!("LZW expanded {} bytes to {}", data.len(), output.len());
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn code(&self) -> u16 {
        compression::LZW
    }
}
