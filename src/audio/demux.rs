//! Container demuxing
//!
//! Opens a compressed audio container, selects its first audio track, and
//! yields compressed access units one at a time. Backed by symphonia's
//! format probe and readers (MP3, FLAC, AAC, MP4, Ogg/Vorbis, WAV).

use symphonia::core::codecs::{CodecParameters, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::meta::MetadataOptions;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::source::AudioSource;

/// Metadata of the selected audio track
#[derive(Debug, Clone)]
pub struct TrackFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Channel count in the source (1 = mono, 2 = stereo, ...)
    pub channels: u16,

    /// Total track duration in microseconds
    pub duration_us: u64,

    /// Codec short name, for logging
    pub codec_name: String,
}

impl TrackFormat {
    /// Total PCM frames the track decodes to, derived from duration and rate.
    pub fn total_samples(&self) -> u64 {
        self.duration_us * self.sample_rate as u64 / 1_000_000
    }
}

/// One compressed, decoder-ready unit of encoded audio
pub struct AccessUnit {
    /// Track the unit belongs to
    pub track_id: u32,

    /// Presentation timestamp, in track time-base units
    pub ts: u64,

    /// Duration, in track time-base units
    pub dur: u64,

    /// Encoded payload
    pub data: Box<[u8]>,
}

/// Container demuxing capability.
///
/// `next_access_unit` returns `Ok(None)` at end of stream. A demuxer is
/// consumed by one extraction call and dropped when it returns.
pub trait Demuxer {
    /// Format of the selected audio track
    fn track_format(&self) -> &TrackFormat;

    /// Pull the next access unit for the selected track
    fn next_access_unit(&mut self) -> Result<Option<AccessUnit>>;
}

/// Demuxer backed by symphonia's format readers
pub struct SymphoniaDemuxer {
    format: Box<dyn FormatReader>,
    track_id: u32,
    track_format: TrackFormat,
    codec_params: CodecParameters,
}

impl SymphoniaDemuxer {
    /// Probe a source and select its first audio track.
    ///
    /// # Errors
    /// - [`Error::SourceUnreadable`] — container cannot be probed, or the
    ///   track reports no sample rate / duration
    /// - [`Error::NoAudioTrack`] — no track carries a decodable audio codec
    pub fn open(source: AudioSource) -> Result<Self> {
        let AudioSource { stream, hint } = source;

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                stream,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| Error::SourceUnreadable(format!("failed to probe format: {}", e)))?;

        let format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(Error::NoAudioTrack)?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params.sample_rate.ok_or_else(|| {
            Error::SourceUnreadable("track reports no sample rate".to_string())
        })?;

        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(1);

        // The bin layout is derived from the track duration up front, so a
        // container that reports none cannot be extracted.
        let n_frames = codec_params.n_frames.ok_or_else(|| {
            Error::SourceUnreadable("track reports no duration".to_string())
        })?;
        let duration_us = n_frames * 1_000_000 / sample_rate as u64;

        let codec_name = symphonia::default::get_codecs()
            .get_codec(codec_params.codec)
            .map(|desc| desc.short_name.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        debug!(
            track_id,
            sample_rate,
            channels,
            duration_us,
            codec = %codec_name,
            "Selected audio track"
        );

        Ok(Self {
            format,
            track_id,
            track_format: TrackFormat {
                sample_rate,
                channels,
                duration_us,
                codec_name,
            },
            codec_params,
        })
    }

    /// Codec parameters of the selected track, for decoder construction
    pub fn codec_params(&self) -> &CodecParameters {
        &self.codec_params
    }
}

impl Demuxer for SymphoniaDemuxer {
    fn track_format(&self) -> &TrackFormat {
        &self.track_format
    }

    fn next_access_unit(&mut self) -> Result<Option<AccessUnit>> {
        loop {
            let packet = match self.format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return Ok(None);
                }
                Err(e) => {
                    // A broken stream tail ends the extraction with the bins
                    // gathered so far rather than failing it.
                    warn!("Error reading packet, treating as end of stream: {}", e);
                    return Ok(None);
                }
            };

            // Skip packets for other tracks
            if packet.track_id() != self.track_id {
                continue;
            }

            return Ok(Some(AccessUnit {
                track_id: packet.track_id(),
                ts: packet.ts(),
                dur: packet.dur(),
                data: packet.data,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_samples_from_duration() {
        let format = TrackFormat {
            sample_rate: 44100,
            channels: 2,
            duration_us: 10_000_000,
            codec_name: "pcm_s16le".to_string(),
        };
        assert_eq!(format.total_samples(), 441_000);
    }

    #[test]
    fn test_total_samples_sub_second() {
        let format = TrackFormat {
            sample_rate: 48000,
            channels: 1,
            duration_us: 500_000,
            codec_name: "flac".to_string(),
        };
        assert_eq!(format.total_samples(), 24_000);
    }

    #[test]
    fn test_open_rejects_garbage() {
        let source = AudioSource::from_bytes(vec![0u8; 512], None);
        assert!(matches!(
            SymphoniaDemuxer::open(source),
            Err(Error::SourceUnreadable(_))
        ));
    }
}
