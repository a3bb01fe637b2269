//! Compression handling for TIFF strips
//!
//! This module implements strategies for the decompression methods a
//! strip can be stored with, and the registry that selects one by tag.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod lzw;
mod packbits;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::AdobeDeflateHandler;
pub use factory::CompressionRegistry;
pub use lzw::LzwHandler;
pub use packbits::PackBitsHandler;
pub use self::zstd::ZstdHandler;
