//! Grayscale interpreters (WhiteIsZero / BlackIsZero)

use image::{Rgba, RgbaImage};

use crate::tiff::errors::TiffResult;
use super::interpreter::{check_bit_depths, check_sample_count, scale_to_u8, PhotometricInterpreter};

/// Grayscale interpreter with an optional alpha sample
///
/// Bilevel images are the 1-bit case of the same scheme.
pub struct GrayscaleInterpreter {
    bits_per_sample: Vec<u8>,
    white_is_zero: bool,
}

impl GrayscaleInterpreter {
    /// Minimum value is black (photometric 1)
    pub fn black_is_zero(bits_per_sample: &[u8]) -> Self {
        GrayscaleInterpreter {
            bits_per_sample: bits_per_sample.to_vec(),
            white_is_zero: false,
        }
    }

    /// Minimum value is white (photometric 0)
    pub fn white_is_zero(bits_per_sample: &[u8]) -> Self {
        GrayscaleInterpreter {
            bits_per_sample: bits_per_sample.to_vec(),
            white_is_zero: true,
        }
    }
}

impl PhotometricInterpreter for GrayscaleInterpreter {
    fn interpret_pixel(&self, raster: &mut RgbaImage, samples: &[u32], x: u32, y: u32) -> TiffResult<()> {
        check_sample_count(self.name(), samples, &[1, 2])?;
        check_bit_depths(self.name(), samples, &self.bits_per_sample)?;

        let mut gray = scale_to_u8(samples[0], self.bits_per_sample[0])?;
        if self.white_is_zero {
            gray = 255 - gray;
        }
        let alpha = match samples.get(1) {
            Some(&a) => scale_to_u8(a, self.bits_per_sample[1])?,
            None => 255,
        };

        raster.put_pixel(x, y, Rgba([gray, gray, gray, alpha]));
        Ok(())
    }

    fn name(&self) -> &'static str {
        if self.white_is_zero { "WhiteIsZero" } else { "BlackIsZero" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiff::errors::TiffError;

    #[test]
    fn test_black_is_zero() {
        let mut raster = RgbaImage::new(2, 1);
        let interpreter = GrayscaleInterpreter::black_is_zero(&[4]);

        interpreter.interpret_pixel(&mut raster, &[15], 0, 0).unwrap();
        interpreter.interpret_pixel(&mut raster, &[0], 1, 0).unwrap();

        assert_eq!(raster.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(raster.get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_white_is_zero_bilevel() {
        let mut raster = RgbaImage::new(1, 1);
        let interpreter = GrayscaleInterpreter::white_is_zero(&[1]);

        interpreter.interpret_pixel(&mut raster, &[1], 0, 0).unwrap();
        assert_eq!(raster.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_gray_with_alpha() {
        let mut raster = RgbaImage::new(1, 1);
        let interpreter = GrayscaleInterpreter::black_is_zero(&[8, 8]);

        interpreter.interpret_pixel(&mut raster, &[100, 50], 0, 0).unwrap();
        assert_eq!(raster.get_pixel(0, 0), &Rgba([100, 100, 100, 50]));
    }

    #[test]
    fn test_rejects_wrong_sample_count() {
        let mut raster = RgbaImage::new(1, 1);
        let interpreter = GrayscaleInterpreter::black_is_zero(&[8, 8, 8]);

        assert!(matches!(
            interpreter.interpret_pixel(&mut raster, &[1, 2, 3], 0, 0),
            Err(TiffError::PhotometricError { .. })
        ));
    }
}
