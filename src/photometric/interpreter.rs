//! Photometric interpreter trait definition

use image::RgbaImage;

use crate::tiff::errors::{TiffError, TiffResult};

/// Strategy trait for turning a pixel's samples into a color
pub trait PhotometricInterpreter {
    /// Convert one pixel's samples and write the result at (x, y)
    ///
    /// # Arguments
    /// * `raster` - Output raster, at least (x + 1) x (y + 1) in size
    /// * `samples` - Decoded samples of the pixel, one per channel
    /// * `x` - Column of the pixel
    /// * `y` - Row of the pixel
    fn interpret_pixel(&self, raster: &mut RgbaImage, samples: &[u32], x: u32, y: u32) -> TiffResult<()>;

    /// Name of the photometric scheme
    fn name(&self) -> &'static str;
}

/// Scale a sample of `bits` width to the 0-255 range
///
/// Narrow samples are stretched so that the maximum maps to 255; wide
/// samples keep their most significant byte.
pub fn scale_to_u8(value: u32, bits: u8) -> TiffResult<u8> {
    if bits == 0 || bits > 32 {
        return Err(TiffError::photometric(format!("unsupported sample width of {} bits", bits)));
    }
    let max = ((1u64 << bits) - 1) as u32;
    if value > max {
        return Err(TiffError::photometric(format!(
            "sample value {} exceeds {}-bit range", value, bits
        )));
    }

    let scaled = match bits {
        8 => value,
        b if b < 8 => value * 255 / max,
        b => value >> (b - 8),
    };
    Ok(scaled as u8)
}

/// Check that a pixel carries one of the accepted sample counts
pub(crate) fn check_sample_count(scheme: &str, samples: &[u32], accepted: &[usize]) -> TiffResult<()> {
    if accepted.contains(&samples.len()) {
        Ok(())
    } else {
        Err(TiffError::photometric(format!(
            "{} expects {:?} samples per pixel, got {}", scheme, accepted, samples.len()
        )))
    }
}

/// Check that every sample has a declared bit depth
pub(crate) fn check_bit_depths(scheme: &str, samples: &[u32], bits_per_sample: &[u8]) -> TiffResult<()> {
    if samples.len() > bits_per_sample.len() {
        return Err(TiffError::photometric(format!(
            "{} got {} samples but only {} bit depths are declared",
            scheme, samples.len(), bits_per_sample.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_narrow_samples() {
        assert_eq!(scale_to_u8(0, 1).unwrap(), 0);
        assert_eq!(scale_to_u8(1, 1).unwrap(), 255);
        assert_eq!(scale_to_u8(15, 4).unwrap(), 255);
        assert_eq!(scale_to_u8(8, 4).unwrap(), 136);
        assert_eq!(scale_to_u8(2, 2).unwrap(), 170);
    }

    #[test]
    fn test_scale_wide_samples() {
        assert_eq!(scale_to_u8(200, 8).unwrap(), 200);
        assert_eq!(scale_to_u8(0xABCD, 16).unwrap(), 0xAB);
        assert_eq!(scale_to_u8(0xFFF, 12).unwrap(), 0xFF);
        assert_eq!(scale_to_u8(u32::MAX, 32).unwrap(), 0xFF);
    }

    #[test]
    fn test_scale_out_of_range() {
        assert!(matches!(scale_to_u8(16, 4), Err(TiffError::PhotometricError { .. })));
        assert!(matches!(scale_to_u8(256, 8), Err(TiffError::PhotometricError { .. })));
    }
}
