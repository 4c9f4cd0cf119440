//! Audio source resolution
//!
//! Turns a caller-supplied identifier (file path, `file://` URI, `http(s)://`
//! URL, or an in-memory buffer) into an openable media handle. Scheme
//! resolution happens once, up front; the extraction pipeline itself is
//! agnostic to where the bytes came from.
//!
//! Host-application schemes (`asset://`, `content://`) cannot be resolved
//! here and must be mapped to a concrete file or URL by the embedding
//! application before calling into this crate.

use std::io::Cursor;
use std::path::Path;

use symphonia::core::io::MediaSourceStream;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::error::{Error, Result};

/// Resolved, decodable handle to one audio input.
///
/// Owns the underlying byte stream and the format hint derived from the
/// source name. Valid for a single extraction call, which consumes it.
pub struct AudioSource {
    pub(crate) stream: MediaSourceStream,
    pub(crate) hint: Hint,
}

impl AudioSource {
    /// Open a local file as an audio source.
    ///
    /// The file extension, when present, is passed to the format prober as
    /// a hint.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Error::SourceUnreadable(format!("failed to open {}: {}", path.display(), e))
        })?;

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        Ok(Self {
            stream: MediaSourceStream::new(Box::new(file), Default::default()),
            hint,
        })
    }

    /// Wrap an in-memory buffer as an audio source.
    ///
    /// `extension` is an optional format hint (e.g. `"mp3"`).
    pub fn from_bytes(data: Vec<u8>, extension: Option<&str>) -> Self {
        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        Self {
            stream: MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default()),
            hint,
        }
    }
}

/// Resolve a source identifier to an openable [`AudioSource`].
///
/// Supported schemes:
/// - `http://` / `https://` — body fetched into memory
/// - `file://` — local path
/// - anything else — treated as a local path
///
/// `asset://` and `content://` identifiers belong to the host application's
/// resolver and are rejected.
///
/// Remote fetches block the calling thread; run this on a background worker,
/// never on an async runtime thread.
pub fn resolve(uri: &str) -> Result<AudioSource> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        fetch_remote(uri)
    } else if let Some(path) = uri.strip_prefix("file://") {
        AudioSource::from_path(path)
    } else if uri.starts_with("asset://") || uri.starts_with("content://") {
        Err(Error::SourceUnreadable(format!(
            "scheme of {} must be resolved by the host application",
            uri
        )))
    } else {
        AudioSource::from_path(uri)
    }
}

/// Download a remote source into memory.
fn fetch_remote(url: &str) -> Result<AudioSource> {
    debug!(url, "Fetching remote audio source");

    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::SourceUnreadable(format!("failed to fetch {}: {}", url, e)))?;

    let body = response
        .bytes()
        .map_err(|e| Error::SourceUnreadable(format!("failed to read body of {}: {}", url, e)))?;

    debug!(url, bytes = body.len(), "Remote source fetched");

    Ok(AudioSource::from_bytes(body.to_vec(), url_extension(url)))
}

/// Extract a file-extension hint from a URL path, ignoring query and fragment.
fn url_extension(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next()?;
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://cdn.example.com/a/track.mp3"), Some("mp3"));
        assert_eq!(url_extension("https://example.com/track.flac?sig=abc"), Some("flac"));
        assert_eq!(url_extension("https://example.com/track"), None);
        assert_eq!(url_extension("https://example.com/"), None);
    }

    #[test]
    fn test_resolve_rejects_host_schemes() {
        assert!(matches!(
            resolve("asset://sounds/intro.mp3"),
            Err(Error::SourceUnreadable(_))
        ));
        assert!(matches!(
            resolve("content://media/external/audio/1234"),
            Err(Error::SourceUnreadable(_))
        ));
    }

    #[test]
    fn test_resolve_missing_file() {
        assert!(matches!(
            resolve("/no/such/file.mp3"),
            Err(Error::SourceUnreadable(_))
        ));
        assert!(matches!(
            resolve("file:///no/such/file.mp3"),
            Err(Error::SourceUnreadable(_))
        ));
    }
}
