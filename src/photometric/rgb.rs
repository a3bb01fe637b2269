//! RGB interpreter

use image::{Rgba, RgbaImage};

use crate::tiff::errors::TiffResult;
use super::interpreter::{check_bit_depths, check_sample_count, scale_to_u8, PhotometricInterpreter};

/// RGB interpreter; a fourth sample is used as alpha
pub struct RgbInterpreter {
    bits_per_sample: Vec<u8>,
}

impl RgbInterpreter {
    /// Create an RGB interpreter for the given channel bit depths
    pub fn new(bits_per_sample: &[u8]) -> Self {
        RgbInterpreter {
            bits_per_sample: bits_per_sample.to_vec(),
        }
    }
}

impl PhotometricInterpreter for RgbInterpreter {
    fn interpret_pixel(&self, raster: &mut RgbaImage, samples: &[u32], x: u32, y: u32) -> TiffResult<()> {
        check_sample_count(self.name(), samples, &[3, 4])?;
        check_bit_depths(self.name(), samples, &self.bits_per_sample)?;

        let mut rgba = [0u8, 0, 0, 255];
        for (channel, (&value, &bits)) in samples.iter().zip(&self.bits_per_sample).enumerate() {
            rgba[channel] = scale_to_u8(value, bits)?;
        }

        raster.put_pixel(x, y, Rgba(rgba));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RGB"
    }
}
