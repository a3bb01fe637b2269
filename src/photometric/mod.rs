//! Photometric interpretation of decoded samples
//!
//! Interpreters turn one pixel's sample vector into a color in the output
//! raster. They are selected by the PhotometricInterpretation tag.

mod interpreter;
mod factory;
mod grayscale;
mod rgb;
mod palette;

pub use interpreter::{scale_to_u8, PhotometricInterpreter};
pub use factory::PhotometricFactory;
pub use grayscale::GrayscaleInterpreter;
pub use rgb::RgbInterpreter;
pub use palette::PaletteInterpreter;
