//! Image geometry and sample layout of a stripped TIFF image
//!
//! These values come from the IFD (ImageWidth, ImageLength, BitsPerSample,
//! Predictor, StripOffsets, StripByteCounts) and stay fixed for a decode.

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::{predictor, sample::MAX_BITS_PER_SAMPLE};
use crate::tiff::errors::{TiffError, TiffResult};

/// Width and height of the image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    pub width: u32,
    pub height: u32,
}

impl ImageGeometry {
    /// Create a geometry; both dimensions must be at least 1
    pub fn new(width: u32, height: u32) -> TiffResult<Self> {
        if width == 0 || height == 0 {
            return Err(TiffError::InvalidConfiguration(format!(
                "image dimensions must be at least 1x1, got {}x{}", width, height
            )));
        }
        Ok(ImageGeometry { width, height })
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// How the samples of one pixel are packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLayout {
    bits_per_sample: Vec<u8>,
    bits_per_pixel: u32,
    byte_order: ByteOrder,
}

impl SampleLayout {
    /// Create a layout from the per-channel bit depths
    ///
    /// # Arguments
    /// * `bits_per_sample` - Bit depth of each channel, 1 to 32 bits each
    /// * `byte_order` - Byte order of byte-aligned multi-byte samples
    pub fn new(bits_per_sample: &[u8], byte_order: ByteOrder) -> TiffResult<Self> {
        if bits_per_sample.is_empty() {
            return Err(TiffError::InvalidConfiguration("no samples per pixel".to_string()));
        }

        if let Some(bad) = bits_per_sample.iter().find(|&&b| b == 0 || b > MAX_BITS_PER_SAMPLE) {
            return Err(TiffError::InvalidConfiguration(format!(
                "unsupported sample width of {} bits (1..={})", bad, MAX_BITS_PER_SAMPLE
            )));
        }

        Ok(SampleLayout {
            bits_per_sample: bits_per_sample.to_vec(),
            bits_per_pixel: bits_per_sample.iter().map(|&b| b as u32).sum(),
            byte_order,
        })
    }

    /// Check a separately declared bits-per-pixel value against the channels
    pub fn with_bits_per_pixel(self, bits_per_pixel: u32) -> TiffResult<Self> {
        if bits_per_pixel != self.bits_per_pixel {
            return Err(TiffError::InvalidConfiguration(format!(
                "bits per pixel {} does not match sum of bits per sample {:?} ({})",
                bits_per_pixel, self.bits_per_sample, self.bits_per_pixel
            )));
        }
        Ok(self)
    }

    pub fn bits_per_sample(&self) -> &[u8] {
        &self.bits_per_sample
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    pub fn samples_per_pixel(&self) -> usize {
        self.bits_per_sample.len()
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Bytes in one row of `width` pixels, including the padding to a byte boundary
    pub fn row_bytes(&self, width: u32) -> usize {
        ((width as u64 * self.bits_per_pixel as u64 + 7) / 8) as usize
    }
}

/// Prediction scheme applied before compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictorMode {
    #[default]
    None,
    HorizontalDifferencing,
}

impl PredictorMode {
    /// Map a Predictor tag value to a mode
    pub fn from_tag(value: u16) -> TiffResult<Self> {
        match value {
            predictor::NONE => Ok(PredictorMode::None),
            predictor::HORIZONTAL_DIFFERENCING => Ok(PredictorMode::HorizontalDifferencing),
            other => Err(TiffError::InvalidConfiguration(format!(
                "unsupported predictor {}", other
            ))),
        }
    }
}

/// Location of one strip in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripDescriptor {
    /// Strip number (0-based)
    pub index: usize,
    /// File offset where the compressed strip starts
    pub offset: u64,
    /// Compressed size of the strip in bytes
    pub byte_count: u64,
}
