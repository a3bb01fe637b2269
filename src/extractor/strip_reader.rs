//! Strip-based image data extraction
//!
//! Stripped TIFFs store the image as horizontal bands of `rows_per_strip`
//! rows spanning the full width. Each strip is compressed on its own; the
//! reader fetches, decompresses and decodes the strips in order into one
//! RGBA raster.

use image::RgbaImage;
use log::{debug, info};

use crate::compression::CompressionRegistry;
use crate::io::byte_order::ByteOrder;
use crate::io::byte_source::ByteSource;
use crate::photometric::{PhotometricFactory, PhotometricInterpreter};
use crate::tiff::constants::{compression, photometric};
use crate::tiff::errors::{TiffError, TiffResult};
use super::layout::{ImageGeometry, PredictorMode, SampleLayout, StripDescriptor};
use super::strip_decoder::StripDecoder;

/// Builder for StripDataReader
///
/// Defaults follow the TIFF tag defaults: one 1-bit sample, no compression,
/// no predictor, BlackIsZero, and a single strip covering the whole image.
pub struct StripDataReaderBuilder {
    width: u32,
    height: u32,
    bits_per_sample: Vec<u8>,
    bits_per_pixel: Option<u32>,
    byte_order: ByteOrder,
    predictor: PredictorMode,
    rows_per_strip: u32,
    strip_offsets: Vec<u64>,
    strip_byte_counts: Vec<u64>,
    compression: u16,
    photometric: u16,
    color_map: Option<Vec<u16>>,
    interpreter: Option<Box<dyn PhotometricInterpreter>>,
    registry: Option<CompressionRegistry>,
}

impl StripDataReaderBuilder {
    /// Create a new builder for an image of the given size
    pub fn new(width: u32, height: u32) -> Self {
        StripDataReaderBuilder {
            width,
            height,
            bits_per_sample: vec![1],
            bits_per_pixel: None,
            byte_order: ByteOrder::default(),
            predictor: PredictorMode::None,
            rows_per_strip: u32::MAX,
            strip_offsets: Vec::new(),
            strip_byte_counts: Vec::new(),
            compression: compression::NONE,
            photometric: photometric::BLACK_IS_ZERO,
            color_map: None,
            interpreter: None,
            registry: None,
        }
    }

    /// Bit depth of each channel
    pub fn bits_per_sample(mut self, bits: &[u8]) -> Self {
        self.bits_per_sample = bits.to_vec();
        self
    }

    /// Declared bits per pixel, checked against the channel depths
    pub fn bits_per_pixel(mut self, bits: u32) -> Self {
        self.bits_per_pixel = Some(bits);
        self
    }

    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn predictor(mut self, predictor: PredictorMode) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn rows_per_strip(mut self, rows: u32) -> Self {
        self.rows_per_strip = rows;
        self
    }

    pub fn strip_offsets(mut self, offsets: Vec<u64>) -> Self {
        self.strip_offsets = offsets;
        self
    }

    pub fn strip_byte_counts(mut self, byte_counts: Vec<u64>) -> Self {
        self.strip_byte_counts = byte_counts;
        self
    }

    /// Compression tag value
    pub fn compression(mut self, compression: u16) -> Self {
        self.compression = compression;
        self
    }

    /// PhotometricInterpretation tag value, used when no interpreter is set
    pub fn photometric(mut self, photometric: u16) -> Self {
        self.photometric = photometric;
        self
    }

    /// ColorMap tag values for palette images
    pub fn color_map(mut self, color_map: Vec<u16>) -> Self {
        self.color_map = Some(color_map);
        self
    }

    /// Use a custom interpreter instead of the photometric tag
    pub fn interpreter(mut self, interpreter: Box<dyn PhotometricInterpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    /// Use a custom codec registry instead of the built-in one
    pub fn registry(mut self, registry: CompressionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the StripDataReader
    ///
    /// # Returns
    /// The reader, or `InvalidConfiguration` / `PhotometricError` when the
    /// settings are inconsistent
    pub fn build(self) -> TiffResult<StripDataReader> {
        let geometry = ImageGeometry::new(self.width, self.height)?;

        let mut layout = SampleLayout::new(&self.bits_per_sample, self.byte_order)?;
        if let Some(bits_per_pixel) = self.bits_per_pixel {
            layout = layout.with_bits_per_pixel(bits_per_pixel)?;
        }

        let interpreter = match self.interpreter {
            Some(interpreter) => interpreter,
            None => PhotometricFactory::create_interpreter(
                self.photometric,
                &self.bits_per_sample,
                self.color_map
            )?,
        };

        Ok(StripDataReader {
            geometry,
            layout,
            predictor: self.predictor,
            rows_per_strip: self.rows_per_strip,
            strip_offsets: self.strip_offsets,
            strip_byte_counts: self.strip_byte_counts,
            compression: self.compression,
            interpreter,
            registry: self.registry.unwrap_or_default(),
        })
    }
}

/// Reads image data from stripped TIFF files
///
/// Holds the geometry and strip table of one image. Every call to
/// [`StripDataReader::read_image_data`] decodes the full image from scratch.
pub struct StripDataReader {
    geometry: ImageGeometry,
    layout: SampleLayout,
    predictor: PredictorMode,
    rows_per_strip: u32,
    strip_offsets: Vec<u64>,
    strip_byte_counts: Vec<u64>,
    compression: u16,
    interpreter: Box<dyn PhotometricInterpreter>,
    registry: CompressionRegistry,
}

impl StripDataReader {
    /// Start building a reader for an image of the given size
    pub fn builder(width: u32, height: u32) -> StripDataReaderBuilder {
        StripDataReaderBuilder::new(width, height)
    }

    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }

    pub fn layout(&self) -> &SampleLayout {
        &self.layout
    }

    pub fn rows_per_strip(&self) -> u32 {
        self.rows_per_strip
    }

    /// Number of strips needed to cover the image height
    pub fn expected_strip_count(&self) -> TiffResult<usize> {
        if self.rows_per_strip == 0 {
            return Err(TiffError::strip_geometry("rows per strip must be at least 1"));
        }
        Ok(((self.geometry.height as u64 + self.rows_per_strip as u64 - 1)
            / self.rows_per_strip as u64) as usize)
    }

    /// Strip table as descriptors, in strip order
    pub fn strip_descriptors(&self) -> TiffResult<Vec<StripDescriptor>> {
        if self.strip_offsets.len() != self.strip_byte_counts.len() {
            return Err(TiffError::strip_geometry(format!(
                "{} strip offsets but {} strip byte counts",
                self.strip_offsets.len(), self.strip_byte_counts.len()
            )));
        }

        Ok(self.strip_offsets
            .iter()
            .zip(&self.strip_byte_counts)
            .enumerate()
            .map(|(index, (&offset, &byte_count))| StripDescriptor { index, offset, byte_count })
            .collect())
    }

    /// Number of image rows stored in a strip
    ///
    /// The last strip may hold fewer than `rows_per_strip` rows. A strip that
    /// starts below the image is an `InvalidStripGeometry` error.
    pub fn rows_in_strip(&self, index: usize) -> TiffResult<u32> {
        let rows_per_strip = self.rows_per_strip as i64;
        let remaining = self.geometry.height as i64 - index as i64 * rows_per_strip;
        let rows = rows_per_strip.min(remaining);

        if rows <= 0 {
            return Err(TiffError::strip_geometry(format!(
                "strip starts at row {} of a {} row image",
                index as i64 * rows_per_strip, self.geometry.height
            )).in_strip(index));
        }
        Ok(rows as u32)
    }

    /// Decompressed size of a strip holding `rows` rows
    pub fn expected_strip_len(&self, rows: u32) -> usize {
        rows as usize * self.layout.row_bytes(self.geometry.width)
    }

    fn validate(&self, raster: &RgbaImage) -> TiffResult<Vec<StripDescriptor>> {
        let (width, height) = raster.dimensions();
        if (width, height) != (self.geometry.width, self.geometry.height) {
            return Err(TiffError::InvalidConfiguration(format!(
                "raster is {}x{}, image is {}x{}",
                width, height, self.geometry.width, self.geometry.height
            )));
        }

        let strips = self.strip_descriptors()?;
        let expected = self.expected_strip_count()?;
        if strips.len() != expected {
            return Err(TiffError::strip_geometry(format!(
                "{} strips given, {} rows at {} rows per strip need {}",
                strips.len(), self.geometry.height, self.rows_per_strip, expected
            )));
        }

        Ok(strips)
    }

    /// Decode all strips into the raster
    ///
    /// # Arguments
    /// * `raster` - Output raster, exactly width x height
    /// * `byte_source` - Source of the raw file bytes
    ///
    /// # Returns
    /// Ok once every strip is decoded, or the first error
    pub fn read_image_data(&self, raster: &mut RgbaImage, byte_source: &mut dyn ByteSource) -> TiffResult<()> {
        let handler = self.registry.handler(self.compression)?;
        info!("Using compression: {}", handler.name());

        let strips = self.validate(raster)?;
        info!("Rows per strip: {}", self.rows_per_strip);
        info!("Total strips: {}", strips.len());
        debug!("Interpreting samples {:?} as {}", self.layout.bits_per_sample(), self.interpreter.name());

        let mut decoder = StripDecoder::new(
            self.geometry,
            &self.layout,
            self.predictor,
            &*self.interpreter
        );

        for strip in &strips {
            let rows = self.rows_in_strip(strip.index)?;
            let pixels = rows as usize * self.geometry.width as usize;
            let expected_len = self.expected_strip_len(rows);

            debug!("Reading strip {} at offset {} with {} bytes ({} rows)",
                   strip.index, strip.offset, strip.byte_count, rows);

            let compressed = byte_source
                .get_block(strip.offset, strip.byte_count)
                .map_err(|e| e.in_strip(strip.index))?;

            let decompressed = handler
                .decompress_to_length(&compressed, expected_len)
                .map_err(|e| e.in_strip(strip.index))?;

            let stats = decoder.decode_strip(raster, &decompressed, pixels, strip.index)?;
            debug!("Strip {}: {} pixels read, {} written, {} of {} bytes consumed",
                   strip.index, stats.pixels_read, stats.pixels_written,
                   stats.bytes_consumed, decompressed.len());
        }

        Ok(())
    }
}
