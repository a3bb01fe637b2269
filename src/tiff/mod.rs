//! TIFF error types and tag constants
//!
//! This module provides the error enum shared by every stage of strip
//! decoding and the TIFF 6.0 tag values the decoder understands.

pub mod errors;
pub mod constants;

pub use errors::{Location, TiffError, TiffResult};
