//! Handler for ZSTD compressed data

use std::io::Read;

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;
use log::{debug, warn};

/// ZSTD compression handler (compression code 50000)
pub struct ZstdHandler;

fn zstd_error(e: std::io::Error) -> TiffError {
    warn!("ZSTD decompression error: {}", e);
    TiffError::decompression(format!("ZSTD: {}", e))
}

impl CompressionHandler for ZstdHandler {
    fn decompress(&self, data: &[u8], limit: usize) -> TiffResult<Vec<u8>> {
        debug!("ZSTD decompressing {} bytes (limit {})", data.len(), limit);
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let decoder = zstd::stream::read::Decoder::with_buffer(data).map_err(zstd_error)?;
        let mut decompressed_data = Vec::new();
        decoder
            .take(limit as u64)
            .read_to_end(&mut decompressed_data)
            .map_err(zstd_error)?;

        debug!("ZSTD decompressed to {} bytes", decompressed_data.len());
        Ok(decompressed_data)
    }

    fn name(&self) -> &'static str {
        "ZSTD"
    }

    fn code(&self) -> u16 {
        compression::ZSTD
    }
}
