//! Image data extraction from stripped TIFF files
//!
//! The strip reader walks the strip table, the strip decoder turns one
//! decompressed strip into pixels.

mod layout;
mod cursor;
mod predictor;
mod strip_decoder;
mod strip_reader;
#[cfg(test)]
mod tests;

// Public exports
pub use layout::{ImageGeometry, PredictorMode, SampleLayout, StripDescriptor};
pub use cursor::{CursorStep, DecodeCursor};
pub use predictor::Predictor;
pub use strip_decoder::{StripDecoder, StripStats};
pub use strip_reader::{StripDataReader, StripDataReaderBuilder};
