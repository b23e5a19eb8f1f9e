//! Subcommand implementations.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, ensure, Context, Result};
use ed25519_dalek::{Signer, SigningKey};
use npnt_core::{
    ArtifactEncoding, Coordinate, EngineConfig, Fence, FixedPositionTelemetry, NpntHandle,
    PermissionApi, PermissionArtifact, Position, TelemetrySnapshot,
};
use tracing::{info, warn};
use zeroize::Zeroizing;

pub fn sign(payload: &Path, seed: &str, base64: bool) -> Result<ExitCode> {
    let payload = fs::read(payload)
        .with_context(|| format!("Failed to read payload {}", payload.display()))?;
    serde_json::from_slice::<serde_json::Value>(&payload).context("Payload is not JSON")?;

    let seed = Zeroizing::new(hex::decode(seed.trim()).context("Seed is not hex")?);
    let seed: &[u8; 32] = seed
        .as_slice()
        .try_into()
        .context("Seed must be 32 bytes")?;
    let key = SigningKey::from_bytes(seed);

    let signature = key.sign(&payload).to_bytes();
    let encoding = if base64 {
        ArtifactEncoding::Base64
    } else {
        ArtifactEncoding::Raw
    };
    let bundle = PermissionArtifact::new(payload, signature.to_vec()).to_bundle(encoding)?;

    info!(
        public_key = %hex::encode(key.verifying_key().to_bytes()),
        "artifact signed"
    );
    println!("{bundle}");
    Ok(ExitCode::SUCCESS)
}

fn load_handle(config: &Path, bundle: &Path) -> Result<(NpntHandle, Vec<u8>)> {
    let config = EngineConfig::load(config).context("Failed to load engine config")?;
    let handle = NpntHandle::new(config).context("Invalid trust configuration")?;
    let bundle = fs::read(bundle)
        .with_context(|| format!("Failed to read bundle {}", bundle.display()))?;
    Ok((handle, bundle))
}

pub fn verify(config: &Path, bundle: &Path) -> Result<ExitCode> {
    let (mut handle, bundle) = load_handle(config, bundle)?;

    match handle.submit_bundle(&bundle) {
        Ok(envelope) => {
            println!("{}", serde_json::to_string_pretty(&*envelope)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("rejected: {} ({e})", e.reason());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn check(
    config: &Path,
    bundle: &Path,
    lat: f64,
    lon: f64,
    alt: f64,
    time: Option<u64>,
) -> Result<ExitCode> {
    let (mut handle, bundle) = load_handle(config, bundle)?;

    if let Err(e) = handle.submit_bundle(&bundle) {
        println!("rejected: {} ({e})", e.reason());
        return Ok(ExitCode::FAILURE);
    }

    let position = Position::new(lat, lon, alt);
    let report = match time {
        Some(t) => handle.evaluate(TelemetrySnapshot::at(t, position)),
        None => handle.tick(&mut FixedPositionTelemetry::new(position)),
    };
    if report.breach.is_breach() {
        warn!(breach = ?report.breach, "Position breaches the permission envelope");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::SUCCESS)
}

pub fn pip(fence: &str, lat: f64, lon: f64) -> Result<ExitCode> {
    let fence = Fence::new(&parse_fence(fence)?).context("Invalid fence")?;
    let inside = fence.contains(lat, lon);
    println!("{}", if inside { "inside" } else { "outside" });
    Ok(ExitCode::SUCCESS)
}

/// Parse `"lat,lon;lat,lon;..."`.
fn parse_fence(text: &str) -> Result<Vec<Coordinate>> {
    let vertices = text
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let Some((lat, lon)) = pair.split_once(',') else {
                bail!("Vertex {pair:?} is not \"lat,lon\"");
            };
            let lat = lat.trim().parse().with_context(|| format!("Bad latitude in {pair:?}"))?;
            let lon = lon.trim().parse().with_context(|| format!("Bad longitude in {pair:?}"))?;
            Ok(Coordinate::new(lat, lon))
        })
        .collect::<Result<Vec<_>>>()?;
    ensure!(!vertices.is_empty(), "Fence has no vertices");
    Ok(vertices)
}
