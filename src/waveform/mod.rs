//! Waveform extraction
//!
//! The binning algorithm ([`binner::BinAccumulator`]), the feed/drain
//! pipeline driving it ([`extractor`]), and the synthetic fallback shape
//! ([`placeholder`]).

pub mod binner;
pub mod extractor;
pub mod placeholder;

pub use binner::BinAccumulator;
pub use extractor::{
    extract_file, extract_file_async, extract_source, extract_uri, extract_uri_async,
};
pub use placeholder::{placeholder_waveform, placeholder_waveform_jittered};
