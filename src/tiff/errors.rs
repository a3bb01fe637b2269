//! Custom error types for TIFF strip decoding

use std::fmt;
use std::io;

/// Where in the decode an error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Strip index (0-based)
    pub strip: usize,
    /// Pixel position of the cursor, when the failure happened inside a strip
    pub pixel: Option<(u32, u32)>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pixel {
            Some((x, y)) => write!(f, "strip {}, pixel ({}, {})", self.strip, x, y),
            None => write!(f, "strip {}", self.strip),
        }
    }
}

/// TIFF strip decoding error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Strip metadata disagrees with the image geometry
    InvalidStripGeometry {
        reason: String,
        location: Option<Location>,
    },
    /// Requested byte range is not available from the byte source
    SourceReadError {
        offset: u64,
        length: u64,
        available: u64,
        location: Option<Location>,
    },
    /// No decompressor registered for the compression tag
    UnsupportedCompression(u16),
    /// Codec failure or decompressed length mismatch
    DecompressionError {
        reason: String,
        location: Option<Location>,
    },
    /// Bits requested past the end of a decompressed strip
    UnexpectedEndOfData {
        requested_bits: u32,
        available_bits: usize,
        location: Option<Location>,
    },
    /// Photometric interpreter rejected a sample vector
    PhotometricError {
        reason: String,
        location: Option<Location>,
    },
    /// Decoder configuration is inconsistent
    InvalidConfiguration(String),
}

impl TiffError {
    /// Create an `InvalidStripGeometry` error without location
    pub fn strip_geometry(reason: impl Into<String>) -> Self {
        TiffError::InvalidStripGeometry { reason: reason.into(), location: None }
    }

    /// Create a `DecompressionError` without location
    pub fn decompression(reason: impl Into<String>) -> Self {
        TiffError::DecompressionError { reason: reason.into(), location: None }
    }

    /// Create a `PhotometricError` without location
    pub fn photometric(reason: impl Into<String>) -> Self {
        TiffError::PhotometricError { reason: reason.into(), location: None }
    }

    /// Attach a strip index to errors that carry a location
    ///
    /// A location that is already set is kept, so the innermost context wins.
    pub fn in_strip(self, strip: usize) -> Self {
        self.with_location(Location { strip, pixel: None })
    }

    /// Attach a strip index and pixel position to errors that carry a location
    pub fn at_pixel(self, strip: usize, x: u32, y: u32) -> Self {
        self.with_location(Location { strip, pixel: Some((x, y)) })
    }

    fn with_location(mut self, new_location: Location) -> Self {
        match &mut self {
            TiffError::InvalidStripGeometry { location, .. }
            | TiffError::SourceReadError { location, .. }
            | TiffError::DecompressionError { location, .. }
            | TiffError::UnexpectedEndOfData { location, .. }
            | TiffError::PhotometricError { location, .. } => {
                if location.is_none() {
                    *location = Some(new_location);
                }
            }
            _ => {}
        }
        self
    }

    /// Location attached to this error, if any
    pub fn location(&self) -> Option<Location> {
        match self {
            TiffError::InvalidStripGeometry { location, .. }
            | TiffError::SourceReadError { location, .. }
            | TiffError::DecompressionError { location, .. }
            | TiffError::UnexpectedEndOfData { location, .. }
            | TiffError::PhotometricError { location, .. } => *location,
            _ => None,
        }
    }
}

fn write_location(f: &mut fmt::Formatter<'_>, location: &Option<Location>) -> fmt::Result {
    match location {
        Some(loc) => write!(f, " ({})", loc),
        None => Ok(()),
    }
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidStripGeometry { reason, location } => {
                write!(f, "Invalid strip geometry: {}", reason)?;
                write_location(f, location)
            }
            TiffError::SourceReadError { offset, length, available, location } => {
                write!(f, "Cannot read {} bytes at offset {} (source has {} bytes)",
                       length, offset, available)?;
                write_location(f, location)
            }
            TiffError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            TiffError::DecompressionError { reason, location } => {
                write!(f, "Decompression error: {}", reason)?;
                write_location(f, location)
            }
            TiffError::UnexpectedEndOfData { requested_bits, available_bits, location } => {
                write!(f, "Unexpected end of data: requested {} bits, {} available",
                       requested_bits, available_bits)?;
                write_location(f, location)
            }
            TiffError::PhotometricError { reason, location } => {
                write!(f, "Photometric error: {}", reason)?;
                write_location(f, location)
            }
            TiffError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiffError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
