//! Synthetic fallback waveform
//!
//! When extraction fails, the rendering layer substitutes a placeholder so
//! the visualization never draws blank. The shape is a rectified sinusoidal
//! envelope over a fixed floor; the jittered variant scales each bar by a
//! random factor for a more organic look.

use std::f32::consts::PI;

use rand::Rng;

/// Floor below the sinusoidal envelope.
const ENVELOPE_FLOOR: f32 = 0.25;

/// Peak swing of the envelope above the floor.
const ENVELOPE_SWING: f32 = 0.6;

/// Deterministic placeholder: `0.25 + |sin(2π·i/n)| · 0.6` per bar.
///
/// Returns exactly `bin_count` values, all in [0, 1].
pub fn placeholder_waveform(bin_count: usize) -> Vec<f32> {
    (0..bin_count)
        .map(|i| {
            let phase = i as f32 / bin_count as f32 * 2.0 * PI;
            ENVELOPE_FLOOR + phase.sin().abs() * ENVELOPE_SWING
        })
        .collect()
}

/// Randomized placeholder: the envelope swing of each bar is scaled by an
/// independent uniform factor in [0, 1).
pub fn placeholder_waveform_jittered(bin_count: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..bin_count)
        .map(|i| {
            let phase = i as f32 / bin_count as f32 * 2.0 * PI;
            ENVELOPE_FLOOR + phase.sin().abs() * ENVELOPE_SWING * rng.gen::<f32>()
        })
        .collect()
}
