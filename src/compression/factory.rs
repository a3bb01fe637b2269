//! Registry of compression handlers keyed by TIFF compression tag

use std::collections::HashMap;
use log::{debug, trace};

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::AdobeDeflateHandler;
use super::lzw::LzwHandler;
use super::packbits::PackBitsHandler;
use super::zstd::ZstdHandler;

/// Lookup table from compression tag to handler
///
/// Starts either empty or with the built-in codecs; callers can register
/// additional handlers (or replace built-in ones) before decoding.
pub struct CompressionRegistry {
    handlers: HashMap<u16, Box<dyn CompressionHandler>>,
}

impl CompressionRegistry {
    /// Create a registry without any handlers
    pub fn empty() -> Self {
        CompressionRegistry {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with all built-in handlers
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(UncompressedHandler));
        registry.register(Box::new(LzwHandler));
        registry.register(Box::new(AdobeDeflateHandler));
        registry.register_as(compression::DEFLATE_OLD, Box::new(AdobeDeflateHandler));
        registry.register(Box::new(PackBitsHandler));
        registry.register(Box::new(ZstdHandler));
        registry
    }

    /// Register a handler under its own compression code
    pub fn register(&mut self, handler: Box<dyn CompressionHandler>) -> &mut Self {
        let code = handler.code();
        self.register_as(code, handler)
    }

    /// Register a handler under an explicit compression code
    pub fn register_as(&mut self, code: u16, handler: Box<dyn CompressionHandler>) -> &mut Self {
        trace!("Registering {} for compression {}", handler.name(), code);
        if let Some(previous) = self.handlers.insert(code, handler) {
            debug!("Replaced {} handler for compression {}", previous.name(), code);
        }
        self
    }

    /// Look up the handler for a compression code
    pub fn handler(&self, code: u16) -> TiffResult<&dyn CompressionHandler> {
        self.handlers
            .get(&code)
            .map(|handler| handler.as_ref())
            .ok_or(TiffError::UnsupportedCompression(code))
    }

    /// Compression codes with a registered handler, ascending
    pub fn codes(&self) -> Vec<u16> {
        let mut codes: Vec<u16> = self.handlers.keys().copied().collect();
        codes.sort_unstable();
        codes
    }
}

impl Default for CompressionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InvertingHandler;

    impl CompressionHandler for InvertingHandler {
        fn decompress(&self, data: &[u8], limit: usize) -> TiffResult<Vec<u8>> {
            Ok(data.iter().take(limit).map(|b| !b).collect())
        }

        fn name(&self) -> &'static str {
            "Inverting"
        }

        fn code(&self) -> u16 {
            9999
        }
    }

    #[test]
    fn test_default_codes() {
        let registry = CompressionRegistry::with_defaults();
        assert_eq!(registry.codes(), vec![1, 5, 8, 32773, 32946, 50000]);
        assert_eq!(registry.handler(compression::DEFLATE_OLD).unwrap().name(), "Adobe Deflate");
    }

    #[test]
    fn test_unknown_code() {
        let registry = CompressionRegistry::with_defaults();
        assert!(matches!(registry.handler(9999), Err(TiffError::UnsupportedCompression(9999))));
        assert!(matches!(
            CompressionRegistry::empty().handler(compression::NONE),
            Err(TiffError::UnsupportedCompression(1))
        ));
    }

    #[test]
    fn test_custom_handler() {
        let mut registry = CompressionRegistry::with_defaults();
        registry.register(Box::new(InvertingHandler));

        let handler = registry.handler(9999).unwrap();
        assert_eq!(handler.decompress(&[0x00, 0xF0], 16).unwrap(), vec![0xFF, 0x0F]);
    }
}
