//! PCM decoding
//!
//! Turns compressed access units into normalized PCM. The symphonia binding
//! decodes synchronously: each submitted unit produces at most one ready
//! chunk, and `poll` drains ready chunks in order.

use std::collections::VecDeque;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions};
use symphonia::core::formats::Packet;
use symphonia::core::sample::Sample;
use tracing::warn;

use crate::audio::demux::AccessUnit;
use crate::error::{Error, Result};

/// One run of decoded PCM.
///
/// Samples are frame-major interleaved and normalized to [-1, 1]. The
/// channel layout is intentionally NOT unwoven: downstream binning treats
/// the chunk as a flat sample stream, so stereo material folds left/right
/// values positionally. That mirrors the reference pipeline and is a known
/// deviation from per-frame loudness.
pub struct PcmChunk {
    /// Normalized samples, all channels interleaved
    pub samples: Vec<f32>,
}

/// PCM decoding capability with a feed/drain surface.
///
/// `submit` feeds one compressed unit; `poll` returns the next ready chunk,
/// or `None` when the decoder's output is fully drained.
pub trait PcmDecoder {
    /// Feed one access unit to the decoder
    fn submit(&mut self, unit: AccessUnit) -> Result<()>;

    /// Pull the next decoded chunk, if any is ready
    fn poll(&mut self) -> Result<Option<PcmChunk>>;
}

/// Decoder backed by symphonia's codec registry
pub struct SymphoniaPcmDecoder {
    decoder: Box<dyn Decoder>,
    ready: VecDeque<PcmChunk>,
}

impl SymphoniaPcmDecoder {
    /// Create a decoder for the given track parameters.
    ///
    /// # Errors
    /// - [`Error::DecoderInit`] — no codec is registered for the track, or
    ///   the codec rejects the parameters
    pub fn new(codec_params: &CodecParameters) -> Result<Self> {
        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| Error::DecoderInit(format!("failed to create decoder: {}", e)))?;

        Ok(Self {
            decoder,
            ready: VecDeque::new(),
        })
    }
}

impl PcmDecoder for SymphoniaPcmDecoder {
    fn submit(&mut self, unit: AccessUnit) -> Result<()> {
        let packet = Packet::new_from_boxed_slice(unit.track_id, unit.ts, unit.dur, unit.data);

        match self.decoder.decode(&packet) {
            Ok(decoded) => {
                let mut samples = Vec::new();
                convert_to_f32(&decoded, &mut samples);
                self.ready.push_back(PcmChunk { samples });
                Ok(())
            }
            Err(e) => {
                // A single undecodable packet is not fatal; skip it.
                warn!("Decode error, skipping packet: {}", e);
                Ok(())
            }
        }
    }

    fn poll(&mut self) -> Result<Option<PcmChunk>> {
        Ok(self.ready.pop_front())
    }
}

/// Convert a decoded buffer to interleaved f32 samples in [-1, 1].
///
/// Integer formats are normalized by the maximum magnitude of their bit
/// depth (32768 for 16-bit); unsigned formats are re-centered first.
fn convert_to_f32(decoded: &AudioBufferRef, output: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::F32(buf) => interleave(buf, |s| s, output),
        AudioBufferRef::F64(buf) => interleave(buf, |s| s as f32, output),
        AudioBufferRef::S32(buf) => interleave(buf, |s| s as f32 / 2_147_483_648.0, output),
        AudioBufferRef::S24(buf) => interleave(buf, |s| s.inner() as f32 / 8_388_608.0, output),
        AudioBufferRef::S16(buf) => interleave(buf, |s| s as f32 / 32_768.0, output),
        AudioBufferRef::S8(buf) => interleave(buf, |s| s as f32 / 128.0, output),
        AudioBufferRef::U32(buf) => {
            interleave(buf, |s| (s as f32 - 2_147_483_648.0) / 2_147_483_648.0, output)
        }
        AudioBufferRef::U24(buf) => {
            interleave(buf, |s| (s.inner() as f32 - 8_388_608.0) / 8_388_608.0, output)
        }
        AudioBufferRef::U16(buf) => interleave(buf, |s| (s as f32 - 32_768.0) / 32_768.0, output),
        AudioBufferRef::U8(buf) => interleave(buf, |s| (s as f32 - 128.0) / 128.0, output),
    }
}

/// Interleave a planar buffer frame-major, mapping each sample to f32.
fn interleave<S, F>(buf: &AudioBuffer<S>, scale: F, output: &mut Vec<f32>)
where
    S: Sample,
    F: Fn(S) -> f32,
{
    let num_channels = buf.spec().channels.count();
    let num_frames = buf.frames();

    output.reserve(num_frames * num_channels);
    for frame_idx in 0..num_frames {
        for ch_idx in 0..num_channels {
            output.push(scale(buf.chan(ch_idx)[frame_idx]));
        }
    }
}
