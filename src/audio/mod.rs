//! Audio demux/decode layer
//!
//! Two capability interfaces sit between the container format and the
//! binning algorithm: [`demux::Demuxer`] pulls compressed access units out
//! of a container, [`decode::PcmDecoder`] turns them into normalized PCM.
//! The symphonia bindings are the only concrete implementations; the
//! waveform pipeline depends on the traits alone.

pub mod decode;
pub mod demux;

pub use decode::{PcmChunk, PcmDecoder, SymphoniaPcmDecoder};
pub use demux::{AccessUnit, Demuxer, SymphoniaDemuxer, TrackFormat};
