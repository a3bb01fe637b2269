//! Horizontal differencing predictor
//!
//! With predictor 2 the encoder stores each sample as the difference from
//! the same channel of the pixel to its left. Decoding adds the previous
//! decoded sample back, wrapping at the sample's own bit width. The first
//! pixel of every row is stored as is.

use super::layout::{PredictorMode, SampleLayout};

/// Per-decode predictor state
pub struct Predictor {
    mode: PredictorMode,
    /// `2^bits - 1` for each channel
    masks: Vec<u32>,
    /// Last decoded sample vector of the current row
    previous: Vec<u32>,
}

impl Predictor {
    /// Create a predictor for a layout
    pub fn new(mode: PredictorMode, layout: &SampleLayout) -> Self {
        let masks = layout
            .bits_per_sample()
            .iter()
            .map(|&bits| ((1u64 << bits) - 1) as u32)
            .collect();

        Predictor {
            mode,
            masks,
            previous: vec![0; layout.samples_per_pixel()],
        }
    }

    pub fn mode(&self) -> PredictorMode {
        self.mode
    }

    /// Undo the prediction for the pixel at column `x`, in place
    ///
    /// # Arguments
    /// * `samples` - Raw samples of the pixel; replaced by decoded samples
    /// * `x` - Position of the pixel within its row
    pub fn apply(&mut self, samples: &mut [u32], x: u32) {
        if self.mode == PredictorMode::None {
            return;
        }

        if x > 0 {
            for ((sample, &previous), &mask) in samples.iter_mut().zip(&self.previous).zip(&self.masks) {
                *sample = previous.wrapping_add(*sample) & mask;
            }
        }

        self.previous.copy_from_slice(samples);
    }

    /// Forget the previous pixel at a row boundary
    pub fn reset(&mut self) {
        self.previous.fill(0);
    }
}
