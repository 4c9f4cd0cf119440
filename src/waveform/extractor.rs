//! Waveform extraction pipeline
//!
//! Orchestrates demux, decode, and binning for one source: compute the bin
//! layout from the track duration, then alternate feeding compressed access
//! units into the decoder with draining every ready PCM chunk into the
//! accumulator, until the stream ends or every bin is closed.
//!
//! One extraction call owns its demuxer and decoder exclusively; both are
//! dropped on every exit path. Calls are independent, so concurrent
//! extractions need no shared state. There is no cancellation inside the
//! pipeline; callers cancel at the dispatch layer by dropping the task.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::audio::decode::{PcmDecoder, SymphoniaPcmDecoder};
use crate::audio::demux::{Demuxer, SymphoniaDemuxer};
use crate::config::ExtractorConfig;
use crate::error::{Error, Result};
use crate::source::{resolve, AudioSource};
use crate::waveform::binner::BinAccumulator;

/// Extract a waveform from a resolved source.
///
/// Returns exactly `bin_count` values in [0, 1]; the loudest bin is 1.0
/// unless the source decodes to silence. The source is consumed.
///
/// This call blocks for the full decode; run it on a background worker.
///
/// # Errors
/// - [`Error::BadRequest`] — `bin_count` is zero
/// - [`Error::SourceUnreadable`] — container cannot be opened or probed
/// - [`Error::NoAudioTrack`] — no decodable audio track
/// - [`Error::DecoderInit`] — codec cannot be created for the track
pub fn extract_source(
    source: AudioSource,
    bin_count: usize,
    config: &ExtractorConfig,
) -> Result<Vec<f32>> {
    if bin_count == 0 {
        return Err(Error::BadRequest(
            "bin count must be at least 1".to_string(),
        ));
    }

    let started = Instant::now();

    let mut demuxer = SymphoniaDemuxer::open(source)?;
    let mut decoder = SymphoniaPcmDecoder::new(demuxer.codec_params())?;

    let bins = run_pipeline(&mut demuxer, &mut decoder, bin_count, config)?;

    info!(
        bin_count,
        codec = %demuxer.track_format().codec_name,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Waveform extraction complete"
    );

    Ok(bins)
}

/// Extract a waveform from a local file.
pub fn extract_file<P: AsRef<Path>>(
    path: P,
    bin_count: usize,
    config: &ExtractorConfig,
) -> Result<Vec<f32>> {
    debug!(path = %path.as_ref().display(), bin_count, "Extracting waveform from file");
    extract_source(AudioSource::from_path(path)?, bin_count, config)
}

/// Extract a waveform from a URI (file path, `file://`, or `http(s)://`).
pub fn extract_uri(uri: &str, bin_count: usize, config: &ExtractorConfig) -> Result<Vec<f32>> {
    debug!(uri, bin_count, "Extracting waveform from URI");
    extract_source(resolve(uri)?, bin_count, config)
}

/// Async wrapper over [`extract_file`], dispatched to the blocking pool.
pub async fn extract_file_async(
    path: impl Into<PathBuf>,
    bin_count: usize,
    config: ExtractorConfig,
) -> Result<Vec<f32>> {
    let path = path.into();
    tokio::task::spawn_blocking(move || extract_file(&path, bin_count, &config))
        .await
        .map_err(|e| Error::Internal(format!("extraction task failed: {}", e)))?
}

/// Async wrapper over [`extract_uri`], dispatched to the blocking pool.
pub async fn extract_uri_async(
    uri: impl Into<String>,
    bin_count: usize,
    config: ExtractorConfig,
) -> Result<Vec<f32>> {
    let uri = uri.into();
    tokio::task::spawn_blocking(move || extract_uri(&uri, bin_count, &config))
        .await
        .map_err(|e| Error::Internal(format!("extraction task failed: {}", e)))?
}

/// Drive the feed/drain loop over a demuxer/decoder pair.
///
/// The drain sub-loop empties every ready chunk before the next feed to
/// bound decoder-side buffering. The loop exits as soon as all bins are
/// closed; remaining compressed input is left unread.
fn run_pipeline(
    demuxer: &mut dyn Demuxer,
    decoder: &mut dyn PcmDecoder,
    bin_count: usize,
    config: &ExtractorConfig,
) -> Result<Vec<f32>> {
    let format = demuxer.track_format();
    let total_samples = format.total_samples();
    let samples_per_bin = (total_samples / bin_count as u64).max(1);

    debug!(
        sample_rate = format.sample_rate,
        channels = format.channels,
        duration_us = format.duration_us,
        total_samples,
        samples_per_bin,
        "Binning layout computed"
    );

    let mut acc = BinAccumulator::new(bin_count, samples_per_bin, config);
    let mut end_of_stream = false;

    while !end_of_stream && !acc.is_full() {
        // Feed one access unit
        match demuxer.next_access_unit()? {
            Some(unit) => decoder.submit(unit)?,
            None => end_of_stream = true,
        }

        // Drain every chunk the decoder has ready
        while let Some(chunk) = decoder.poll()? {
            acc.push_samples(&chunk.samples);
        }
    }

    Ok(acc.finish())
}
