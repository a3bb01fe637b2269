//! Per-strip pixel loop
//!
//! Walks the decompressed bytes of one strip pixel by pixel: read one sample
//! per channel, undo the predictor, hand the result to the photometric
//! interpreter and advance the shared cursor. Rows are realigned to byte
//! boundaries.

use image::RgbaImage;
use log::trace;

use crate::io::bit_reader::BitReader;
use crate::photometric::PhotometricInterpreter;
use crate::tiff::errors::TiffResult;
use super::cursor::{CursorStep, DecodeCursor};
use super::layout::{ImageGeometry, PredictorMode, SampleLayout};
use super::predictor::Predictor;

/// Counters for one decoded strip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripStats {
    /// Pixels whose samples were read from the strip
    pub pixels_read: usize,
    /// Pixels written to the raster
    pub pixels_written: usize,
    /// Bytes of the strip buffer that were touched
    pub bytes_consumed: usize,
}

/// Decodes consecutive strips of one image into a raster
///
/// The cursor and predictor state carry over from one strip to the next,
/// so strips must be fed in order.
pub struct StripDecoder<'a> {
    layout: &'a SampleLayout,
    interpreter: &'a dyn PhotometricInterpreter,
    cursor: DecodeCursor,
    predictor: Predictor,
    samples: Vec<u32>,
}

impl<'a> StripDecoder<'a> {
    /// Create a decoder positioned at the top-left pixel
    pub fn new(
        geometry: ImageGeometry,
        layout: &'a SampleLayout,
        predictor: PredictorMode,
        interpreter: &'a dyn PhotometricInterpreter
    ) -> Self {
        StripDecoder {
            layout,
            interpreter,
            cursor: DecodeCursor::new(geometry),
            predictor: Predictor::new(predictor, layout),
            samples: vec![0; layout.samples_per_pixel()],
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> &DecodeCursor {
        &self.cursor
    }

    /// Decode one strip into the raster
    ///
    /// # Arguments
    /// * `raster` - Output raster of the full image size
    /// * `bytes` - Decompressed strip data
    /// * `pixel_count` - Number of pixels stored in the strip
    /// * `strip_index` - Index of the strip, used for error locations
    ///
    /// # Returns
    /// Counters for the strip, or the first error with its strip and pixel
    pub fn decode_strip(
        &mut self,
        raster: &mut RgbaImage,
        bytes: &[u8],
        pixel_count: usize,
        strip_index: usize
    ) -> TiffResult<StripStats> {
        let mut reader = BitReader::new(bytes, self.layout.byte_order());
        let mut stats = StripStats::default();

        for _ in 0..pixel_count {
            let (x, y) = (self.cursor.x(), self.cursor.y());

            self.read_samples(&mut reader)
                .map_err(|e| e.at_pixel(strip_index, x, y))?;
            stats.pixels_read += 1;

            // Pixels past the image are consumed but not written
            if self.cursor.in_bounds() {
                self.predictor.apply(&mut self.samples, x);
                self.interpreter
                    .interpret_pixel(raster, &self.samples, x, y)
                    .map_err(|e| e.at_pixel(strip_index, x, y))?;
                stats.pixels_written += 1;
            }

            match self.cursor.advance() {
                CursorStep::ReadingRow => {}
                CursorStep::RowComplete => {
                    trace!("Row {} complete in strip {}", y, strip_index);
                    reader.discard_partial_byte();
                    self.predictor.reset();
                }
                CursorStep::StripComplete => {
                    trace!("Last row {} reached in strip {}", y, strip_index);
                    reader.discard_partial_byte();
                    self.predictor.reset();
                    break;
                }
            }
        }

        stats.bytes_consumed = reader.byte_position();
        Ok(stats)
    }

    fn read_samples(&mut self, reader: &mut BitReader) -> TiffResult<()> {
        let layout = self.layout;
        for (sample, &bits) in self.samples.iter_mut().zip(layout.bits_per_sample()) {
            *sample = reader.read_bits(bits)?;
        }
        Ok(())
    }
}
