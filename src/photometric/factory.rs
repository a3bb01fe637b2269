//! Factory for creating photometric interpreters

use log::debug;

use crate::tiff::constants::photometric;
use crate::tiff::errors::{TiffError, TiffResult};
use super::grayscale::GrayscaleInterpreter;
use super::interpreter::PhotometricInterpreter;
use super::palette::PaletteInterpreter;
use super::rgb::RgbInterpreter;

/// Factory for creating photometric interpreters
pub struct PhotometricFactory;

impl PhotometricFactory {
    /// Create an interpreter for the given photometric interpretation tag
    ///
    /// # Arguments
    /// * `photometric` - PhotometricInterpretation tag value
    /// * `bits_per_sample` - Bit depth of each sample
    /// * `color_map` - ColorMap tag values, required for palette images
    ///
    /// # Returns
    /// The interpreter, or a `PhotometricError` for unsupported schemes and
    /// sample counts the scheme cannot handle
    pub fn create_interpreter(
        photometric: u16,
        bits_per_sample: &[u8],
        color_map: Option<Vec<u16>>
    ) -> TiffResult<Box<dyn PhotometricInterpreter>> {
        debug!("Creating interpreter for photometric {} with bits {:?}", photometric, bits_per_sample);

        let samples = bits_per_sample.len();
        let expect_samples = |scheme: &str, accepted: &[usize]| -> TiffResult<()> {
            if accepted.contains(&samples) {
                Ok(())
            } else {
                Err(TiffError::photometric(format!(
                    "{} does not support {} samples per pixel", scheme, samples
                )))
            }
        };

        match photometric {
            photometric::WHITE_IS_ZERO => {
                expect_samples("WhiteIsZero", &[1, 2])?;
                Ok(Box::new(GrayscaleInterpreter::white_is_zero(bits_per_sample)))
            }
            photometric::BLACK_IS_ZERO => {
                expect_samples("BlackIsZero", &[1, 2])?;
                Ok(Box::new(GrayscaleInterpreter::black_is_zero(bits_per_sample)))
            }
            photometric::RGB => {
                expect_samples("RGB", &[3, 4])?;
                Ok(Box::new(RgbInterpreter::new(bits_per_sample)))
            }
            photometric::PALETTE => {
                expect_samples("Palette", &[1])?;
                let color_map = color_map
                    .ok_or_else(|| TiffError::photometric("palette image without a color map"))?;
                Ok(Box::new(PaletteInterpreter::new(bits_per_sample[0], color_map)?))
            }
            other => Err(TiffError::photometric(format!(
                "unsupported photometric interpretation {}", other
            ))),
        }
    }
}
