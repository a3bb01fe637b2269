//! Byte order handling for TIFF sample data
//!
//! Multi-byte samples that start on a byte boundary are stored in the
//! file's byte order. This module assembles such samples from raw bytes.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    #[default]
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the two marker bytes of a TIFF header
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match &marker {
            b"II" => Some(ByteOrder::LittleEndian), // Intel
            b"MM" => Some(ByteOrder::BigEndian),    // Motorola
            _ => None,
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Assemble an unsigned value from 1 to 4 bytes in this byte order
    ///
    /// # Panics
    /// Panics if `bytes` is empty or longer than 4 bytes.
    pub fn read_uint(&self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => LittleEndian::read_uint(bytes, bytes.len()) as u32,
            ByteOrder::BigEndian => BigEndian::read_uint(bytes, bytes.len()) as u32,
        }
    }
}
