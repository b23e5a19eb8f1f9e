//! npnt: operator tool for the NPNT compliance engine.
//!
//! Signs bench artifacts, verifies bundles against a trust configuration
//! and runs one-shot evaluation ticks.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// NPNT compliance engine operator tool
#[derive(Parser, Debug)]
#[command(name = "npnt", version)]
#[command(about = "Verify permission artifacts and evaluate flight envelopes")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a payload with an Ed25519 seed and print the bundle (bench use only)
    Sign {
        /// Permission payload JSON file
        #[arg(long)]
        payload: PathBuf,

        /// 32-byte Ed25519 seed, hex encoded
        #[arg(long)]
        seed: String,

        /// Wrap the bundle in base64
        #[arg(long)]
        base64: bool,
    },

    /// Verify a bundle and print the extracted envelope
    Verify {
        /// Engine configuration (TOML)
        #[arg(long)]
        config: PathBuf,

        /// Artifact bundle file
        #[arg(long)]
        bundle: PathBuf,
    },

    /// Adopt a bundle and evaluate one telemetry sample
    Check {
        /// Engine configuration (TOML)
        #[arg(long)]
        config: PathBuf,

        /// Artifact bundle file
        #[arg(long)]
        bundle: PathBuf,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Altitude above ground level in metres
        #[arg(long, allow_hyphen_values = true)]
        alt: f64,

        /// UTC epoch seconds (defaults to the system clock)
        #[arg(long)]
        time: Option<u64>,
    },

    /// Raw point-in-polygon test
    Pip {
        /// Fence vertices as "lat,lon;lat,lon;..."
        #[arg(long, allow_hyphen_values = true)]
        fence: String,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.json_logs)?;

    match cli.command {
        Command::Sign {
            payload,
            seed,
            base64,
        } => commands::sign(&payload, &seed, base64),
        Command::Verify { config, bundle } => commands::verify(&config, &bundle),
        Command::Check {
            config,
            bundle,
            lat,
            lon,
            alt,
            time,
        } => commands::check(&config, &bundle, lat, lon, alt, time),
        Command::Pip { fence, lat, lon } => commands::pip(&fence, lat, lon),
    }
}
