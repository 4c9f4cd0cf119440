//! Streaming RMS binning
//!
//! Folds a decoded PCM stream into a fixed number of amplitude bins. State
//! is held in an explicit accumulator value threaded through the pipeline:
//! the current bin index, the running sum of squares, the sample count of
//! the open bin, and the absolute sample index.
//!
//! Sample `k` of the stream lands in bin `k / samples_per_bin` while that
//! index is below the bin count; the assignment never moves backward.

use crate::config::ExtractorConfig;

/// Accumulates normalized PCM samples into RMS bins.
pub struct BinAccumulator {
    bins: Vec<f32>,
    samples_per_bin: u64,
    bin_index: usize,
    sum_squares: f64,
    samples_in_bin: u64,
    current_sample: u64,
    gain: f64,
    clamp: f64,
}

impl BinAccumulator {
    /// Create an accumulator for `bin_count` bins of `samples_per_bin`
    /// samples each. `samples_per_bin` must be at least 1.
    pub fn new(bin_count: usize, samples_per_bin: u64, config: &ExtractorConfig) -> Self {
        debug_assert!(samples_per_bin >= 1);

        Self {
            bins: vec![0.0; bin_count],
            samples_per_bin,
            bin_index: 0,
            sum_squares: 0.0,
            samples_in_bin: 0,
            current_sample: 0,
            gain: config.rms_gain as f64,
            clamp: config.rms_clamp as f64,
        }
    }

    /// True once all bins have been closed; further input is discarded.
    pub fn is_full(&self) -> bool {
        self.bin_index >= self.bins.len()
    }

    /// Fold a run of normalized samples into the current bin, closing bins
    /// as their sample-count thresholds are crossed.
    pub fn push_samples(&mut self, samples: &[f32]) {
        for &sample in samples {
            if self.is_full() {
                return;
            }

            let s = sample as f64;
            self.sum_squares += s * s;
            self.samples_in_bin += 1;
            self.current_sample += 1;

            if self.current_sample >= (self.bin_index as u64 + 1) * self.samples_per_bin {
                self.close_bin();
            }
        }
    }

    /// Close the open bin: RMS over its samples, display gain, clamp.
    fn close_bin(&mut self) {
        let rms = (self.sum_squares / self.samples_in_bin as f64).sqrt();
        self.bins[self.bin_index] = (rms * self.gain).min(self.clamp) as f32;
        self.sum_squares = 0.0;
        self.samples_in_bin = 0;
        self.bin_index += 1;
    }

    /// Finalize: close a non-empty partial bin, leave shortfall bins at 0.0,
    /// and normalize so the loudest bin maps to exactly 1.0.
    ///
    /// All-silent input (or no input at all) stays all-zero.
    pub fn finish(mut self) -> Vec<f32> {
        if !self.is_full() && self.samples_in_bin > 0 {
            self.close_bin();
        }

        let peak = self.bins.iter().cloned().fold(0.0f32, f32::max);
        if peak > 0.0 {
            for bin in &mut self.bins {
                *bin /= peak;
            }
        }

        self.bins
    }
}
