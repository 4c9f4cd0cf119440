//! Extraction tuning parameters

use serde::{Deserialize, Serialize};

/// Default display gain applied to each bin's RMS value.
///
/// Typical program material has RMS well below peak, so raw RMS bins render
/// short. The gain lifts them toward the visible range; values above the
/// clamp are cut off.
pub const DEFAULT_RMS_GAIN: f32 = 2.0;

/// Default upper clamp applied after the gain.
pub const DEFAULT_RMS_CLAMP: f32 = 1.0;

/// Waveform extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Gain multiplied into each bin's RMS before clamping
    pub rms_gain: f32,

    /// Upper bound applied to each bin after the gain
    pub rms_clamp: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            rms_gain: DEFAULT_RMS_GAIN,
            rms_clamp: DEFAULT_RMS_CLAMP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.rms_gain, 2.0);
        assert_eq!(config.rms_clamp, 1.0);
    }
}
