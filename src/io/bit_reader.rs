//! MSB-first bit reader over a decompressed strip
//!
//! TIFF packs samples of arbitrary bit width most-significant-bit first and
//! pads every row to a byte boundary. The reader keeps a small cache of the
//! bits left over from the current byte; [`BitReader::discard_partial_byte`]
//! drops that cache at row ends.

use log::trace;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::sample::MAX_BITS_PER_SAMPLE;
use crate::tiff::errors::{TiffError, TiffResult};

/// Reads unsigned integers of 1 to 32 bits from a byte buffer
pub struct BitReader<'a> {
    /// Underlying bytes
    data: &'a [u8],
    /// Index of the next byte to load into the cache
    byte_pos: usize,
    /// Leftover bits of the last loaded byte, right-aligned
    cache: u32,
    /// Number of valid bits in `cache` (0..8)
    cache_bits: u8,
    /// Byte order used for byte-aligned multi-byte reads
    byte_order: ByteOrder,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader positioned at the first byte
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        BitReader {
            data,
            byte_pos: 0,
            cache: 0,
            cache_bits: 0,
            byte_order,
        }
    }

    /// Number of bits still available
    pub fn bits_remaining(&self) -> usize {
        (self.data.len() - self.byte_pos) * 8 + self.cache_bits as usize
    }

    /// Number of whole bytes pulled from the buffer so far
    pub fn byte_position(&self) -> usize {
        self.byte_pos
    }

    /// Number of bits waiting in the cache
    pub fn cached_bits(&self) -> u8 {
        self.cache_bits
    }

    /// Read the next `count` bits as an unsigned integer
    ///
    /// Byte-aligned reads of 8, 16, 24 or 32 bits are assembled in the
    /// reader's byte order; everything else is taken MSB first.
    ///
    /// # Arguments
    /// * `count` - Number of bits to read (1..=32)
    ///
    /// # Returns
    /// The value, or `UnexpectedEndOfData` if the buffer holds fewer bits
    pub fn read_bits(&mut self, count: u8) -> TiffResult<u32> {
        if count == 0 || count > MAX_BITS_PER_SAMPLE {
            return Err(TiffError::InvalidConfiguration(format!(
                "cannot read {} bits at once (1..={})", count, MAX_BITS_PER_SAMPLE
            )));
        }

        let available = self.bits_remaining();
        if count as usize > available {
            return Err(TiffError::UnexpectedEndOfData {
                requested_bits: count as u32,
                available_bits: available,
                location: None,
            });
        }

        if self.cache_bits == 0 && count % 8 == 0 {
            let len = (count / 8) as usize;
            let bytes = &self.data[self.byte_pos..self.byte_pos + len];
            self.byte_pos += len;
            return Ok(self.byte_order.read_uint(bytes));
        }

        let mut result: u64 = 0;
        let mut needed = count;
        while needed > 0 {
            if self.cache_bits == 0 {
                self.cache = self.data[self.byte_pos] as u32;
                self.byte_pos += 1;
                self.cache_bits = 8;
            }

            let take = needed.min(self.cache_bits);
            let shift = self.cache_bits - take;
            let bits = (self.cache >> shift) & ((1u32 << take) - 1);

            result = (result << take) | bits as u64;
            self.cache_bits -= take;
            self.cache &= (1u32 << self.cache_bits) - 1;
            needed -= take;
        }

        Ok(result as u32)
    }

    /// Drop cached bits so the next read starts on a byte boundary
    pub fn discard_partial_byte(&mut self) {
        if self.cache_bits > 0 {
            trace!("Discarding {} padding bits at byte {}", self.cache_bits, self.byte_pos);
        }
        self.cache = 0;
        self.cache_bits = 0;
    }
}
