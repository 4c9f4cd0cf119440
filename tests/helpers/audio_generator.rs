//! Audio test file generation
//!
//! Deterministic WAV fixtures with known loudness characteristics: silence,
//! constant-amplitude sine tones, and a sine leader followed by silence.
//! All fixtures are 16-bit PCM at 44.1 kHz.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::Path;

/// Fixture sample rate (44.1 kHz)
pub const TEST_SAMPLE_RATE: u32 = 44100;

fn spec(channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate: TEST_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn frames_for(duration_ms: u64) -> u64 {
    TEST_SAMPLE_RATE as u64 * duration_ms / 1000
}

/// Generate a silent WAV file.
pub fn generate_silent_wav<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    channels: u16,
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, spec(channels))?;

    for _ in 0..frames_for(duration_ms) * channels as u64 {
        writer.write_sample(0i16)?;
    }

    writer.finalize()
}

/// Generate a constant-amplitude sine WAV file.
///
/// `amplitude` is linear in [0, 1]; keep it below 1.0 to avoid clipping the
/// 16-bit range. All channels carry the same signal.
pub fn generate_sine_wav<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
    channels: u16,
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, spec(channels))?;

    for frame in 0..frames_for(duration_ms) {
        let t = frame as f32 / TEST_SAMPLE_RATE as f32;
        let value = (amplitude * (2.0 * PI * frequency_hz * t).sin() * i16::MAX as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(value)?;
        }
    }

    writer.finalize()
}

/// Generate a mono WAV with a sine leader followed by true silence.
///
/// The first `sine_ms` milliseconds carry a constant-amplitude tone; the
/// rest of the `total_ms` duration is zeros.
pub fn generate_sine_then_silence_wav<P: AsRef<Path>>(
    path: P,
    sine_ms: u64,
    total_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
) -> Result<(), hound::Error> {
    assert!(sine_ms <= total_ms);
    let mut writer = WavWriter::create(path, spec(1))?;

    let sine_frames = frames_for(sine_ms);
    for frame in 0..frames_for(total_ms) {
        let value = if frame < sine_frames {
            let t = frame as f32 / TEST_SAMPLE_RATE as f32;
            (amplitude * (2.0 * PI * frequency_hz * t).sin() * i16::MAX as f32) as i16
        } else {
            0i16
        };
        writer.write_sample(value)?;
    }

    writer.finalize()
}
