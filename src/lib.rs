pub mod io;
pub mod tiff;
pub mod compression;
pub mod photometric;
pub mod extractor;

pub use tiff::{Location, TiffError, TiffResult};
pub use io::{BitReader, ByteOrder, ByteSource, ByteSourceArray, ByteSourceFile};
pub use compression::{CompressionHandler, CompressionRegistry};
pub use photometric::{PhotometricFactory, PhotometricInterpreter};
pub use extractor::{PredictorMode, StripDataReader, StripDataReaderBuilder, StripStats};
