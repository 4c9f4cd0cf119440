//! Audiowave CLI - waveform extraction entry point
//!
//! Resolves a source URI, extracts its waveform off the async runtime, and
//! prints the bins as JSON. With `--fallback`, extraction errors are
//! replaced by the synthetic placeholder shape the rendering layer would
//! use, so output is always a full-length waveform.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audiowave::{extract_uri_async, placeholder_waveform, ExtractorConfig};

/// Command-line arguments for audiowave
#[derive(Parser, Debug)]
#[command(name = "audiowave")]
#[command(about = "Extract a normalized amplitude waveform from an audio source")]
#[command(version)]
struct Args {
    /// Source to extract: file path, file:// URI, or http(s):// URL
    uri: String,

    /// Number of output bins
    #[arg(short, long, default_value = "60", env = "AUDIOWAVE_BINS")]
    bins: usize,

    /// Display gain applied to each bin's RMS
    #[arg(long, default_value = "2.0", env = "AUDIOWAVE_RMS_GAIN")]
    rms_gain: f32,

    /// Substitute the placeholder waveform when extraction fails
    #[arg(long)]
    fallback: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audiowave=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = ExtractorConfig {
        rms_gain: args.rms_gain,
        ..Default::default()
    };

    let bins = match extract_uri_async(args.uri.clone(), args.bins, config).await {
        Ok(bins) => bins,
        Err(e) if args.fallback => {
            warn!(uri = %args.uri, error = %e, "Extraction failed, using placeholder waveform");
            placeholder_waveform(args.bins)
        }
        Err(e) => return Err(e).context(format!("failed to extract waveform from {}", args.uri)),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&bins)?
    } else {
        serde_json::to_string(&bins)?
    };
    println!("{}", json);

    Ok(())
}
