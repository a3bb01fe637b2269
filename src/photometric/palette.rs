//! Palette (color map indexed) interpreter

use image::{Rgba, RgbaImage};

use crate::tiff::errors::{TiffError, TiffResult};
use super::interpreter::{check_sample_count, PhotometricInterpreter};

/// Palette interpreter backed by a TIFF ColorMap
///
/// The ColorMap tag stores all red values, then all green values, then all
/// blue values, each 16 bits wide and `2^bits_per_sample` entries long.
pub struct PaletteInterpreter {
    color_map: Vec<u16>,
    entries: usize,
}

impl PaletteInterpreter {
    /// Create a palette interpreter
    ///
    /// # Arguments
    /// * `bits_per_sample` - Width of the index sample
    /// * `color_map` - ColorMap tag values (3 * 2^bits_per_sample entries)
    pub fn new(bits_per_sample: u8, color_map: Vec<u16>) -> TiffResult<Self> {
        if bits_per_sample == 0 || bits_per_sample > 16 {
            return Err(TiffError::photometric(format!(
                "palette index of {} bits is not supported", bits_per_sample
            )));
        }

        let entries = 1usize << bits_per_sample;
        if color_map.len() != entries * 3 {
            return Err(TiffError::photometric(format!(
                "color map has {} values, expected {} for {}-bit indices",
                color_map.len(), entries * 3, bits_per_sample
            )));
        }

        Ok(PaletteInterpreter { color_map, entries })
    }
}

impl PhotometricInterpreter for PaletteInterpreter {
    fn interpret_pixel(&self, raster: &mut RgbaImage, samples: &[u32], x: u32, y: u32) -> TiffResult<()> {
        check_sample_count(self.name(), samples, &[1])?;

        let index = samples[0] as usize;
        if index >= self.entries {
            return Err(TiffError::photometric(format!(
                "palette index {} outside color map of {} entries", index, self.entries
            )));
        }

        let red = self.color_map[index] >> 8;
        let green = self.color_map[self.entries + index] >> 8;
        let blue = self.color_map[2 * self.entries + index] >> 8;

        raster.put_pixel(x, y, Rgba([red as u8, green as u8, blue as u8, 255]));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Palette"
    }
}
