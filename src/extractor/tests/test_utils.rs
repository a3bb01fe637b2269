//! Shared fixtures for strip decoding tests

use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;

use crate::photometric::PhotometricInterpreter;
use crate::tiff::errors::TiffResult;

/// One pixel delivered to an interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub samples: Vec<u32>,
    pub x: u32,
    pub y: u32,
}

pub type Deliveries = Rc<RefCell<Vec<Delivery>>>;

/// Interpreter that records every pixel it is handed and writes nothing
pub struct RecordingInterpreter {
    deliveries: Deliveries,
}

impl RecordingInterpreter {
    /// Create an interpreter and a handle to its recorded pixels
    pub fn new() -> (Self, Deliveries) {
        let deliveries = Rc::new(RefCell::new(Vec::new()));
        (RecordingInterpreter { deliveries: Rc::clone(&deliveries) }, deliveries)
    }
}

impl PhotometricInterpreter for RecordingInterpreter {
    fn interpret_pixel(&self, _raster: &mut RgbaImage, samples: &[u32], x: u32, y: u32) -> TiffResult<()> {
        self.deliveries.borrow_mut().push(Delivery { samples: samples.to_vec(), x, y });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Recording"
    }
}

/// Sample vectors of all recorded pixels, in delivery order
pub fn recorded_samples(deliveries: &Deliveries) -> Vec<Vec<u32>> {
    deliveries.borrow().iter().map(|d| d.samples.clone()).collect()
}

/// Packs values MSB first, the way TIFF stores samples
#[derive(Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `bits` bits of `value`
    pub fn write(&mut self, value: u32, bits: u8) {
        for shift in (0..bits).rev() {
            let bit = ((value >> shift) & 1) as u8;
            self.current = (self.current << 1) | bit;
            self.filled += 1;
            if self.filled == 8 {
                self.bytes.push(self.current);
                self.current = 0;
                self.filled = 0;
            }
        }
    }

    /// Pad with zero bits to the next byte boundary
    pub fn align(&mut self) {
        if self.filled > 0 {
            let pad = 8 - self.filled;
            self.write(0, pad);
        }
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.align();
        self.bytes
    }
}

/// Encode rows of single-channel samples with horizontal differencing
pub fn difference_rows(rows: &[Vec<u32>], bits: u8) -> Vec<Vec<u32>> {
    let mask = ((1u64 << bits) - 1) as u32;
    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(x, &value)| if x == 0 { value } else { value.wrapping_sub(row[x - 1]) & mask })
                .collect()
        })
        .collect()
}

/// Pack rows of single-channel samples, padding every row to a byte
pub fn pack_rows(rows: &[Vec<u32>], bits: u8) -> Vec<u8> {
    let mut writer = BitWriter::new();
    for row in rows {
        for &value in row {
            writer.write(value, bits);
        }
        writer.align();
    }
    writer.into_bytes()
}

/// Deterministic pseudo-random values below `2^bits`
pub fn pseudo_random_values(count: usize, bits: u8, seed: u32) -> Vec<u32> {
    let mask = ((1u64 << bits) - 1) as u32;
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 8) & mask
        })
        .collect()
}

/// Install a test logger once per process
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
