//! I/O utilities for strip data
//!
//! This module provides byte sources, the sample bit reader and
//! byte order handling.

pub mod seekable;
pub mod byte_order;
pub mod byte_source;
pub mod bit_reader;

pub use bit_reader::BitReader;
pub use byte_order::ByteOrder;
pub use byte_source::{ByteSource, ByteSourceArray, ByteSourceFile};
