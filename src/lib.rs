//! # Audiowave
//!
//! Audio waveform extraction: decode a compressed audio source (file, URL,
//! or in-memory bytes) and fold its PCM stream into N normalized amplitude
//! bins suitable for rendering a scrollable, tappable waveform.
//!
//! **Pipeline:** container probe → first audio track → streaming decode →
//! RMS binning → per-file peak normalization. Output is always exactly N
//! values in [0, 1].
//!
//! **Architecture:** symphonia demux/decode behind two capability traits
//! ([`audio::Demuxer`], [`audio::PcmDecoder`]), with the binning algorithm
//! independent of the concrete binding. Extraction is synchronous and
//! blocking; async callers use the `_async` wrappers, which dispatch to the
//! tokio blocking pool.
//!
//! ```no_run
//! use audiowave::{extract_file, ExtractorConfig};
//!
//! let bins = extract_file("music.mp3", 60, &ExtractorConfig::default())?;
//! assert_eq!(bins.len(), 60);
//! # Ok::<(), audiowave::Error>(())
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod source;
pub mod waveform;

pub use config::ExtractorConfig;
pub use error::{Error, Result};
pub use source::{resolve, AudioSource};
pub use waveform::{
    extract_file, extract_file_async, extract_source, extract_uri, extract_uri_async,
    placeholder_waveform, placeholder_waveform_jittered,
};
