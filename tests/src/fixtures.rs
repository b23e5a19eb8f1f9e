//! # Test Fixtures
//!
//! Shared authority keys, payloads and handles.

use ed25519_dalek::{Signer, SigningKey};
use npnt_core::{
    EngineConfig, NpntHandle, PermissionArtifact, Position, TelemetrySnapshot, TrustAnchorConfig,
    UtcTimestamp,
};
use serde_json::{json, Value};

/// Start of the reference validity window.
pub const T0: UtcTimestamp = 1_700_000_000;

/// Reference window length in seconds.
pub const WINDOW: u64 = 3600;

/// Reference altitude ceiling in metres.
pub const MAX_ALT: f64 = 120.0;

/// Issuer id of the trusted authority.
pub const AUTHORITY: &str = "DGCA";

/// Reference square fence as (lat, lon).
pub const SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];

/// Trusted authority signing key.
pub fn authority_key() -> SigningKey {
    SigningKey::from_bytes(&[0x11; 32])
}

/// A key nobody trusts.
pub fn rogue_key() -> SigningKey {
    SigningKey::from_bytes(&[0x66; 32])
}

/// Config trusting [`authority_key`] as `DGCA`.
pub fn config() -> EngineConfig {
    EngineConfig::for_testing().with_trust_anchor(TrustAnchorConfig::ed25519(
        AUTHORITY,
        authority_key().verifying_key().to_bytes(),
    ))
}

/// Fresh handle on [`config`].
pub fn handle() -> NpntHandle {
    NpntHandle::new(config()).expect("fixture config is valid")
}

/// Payload with the given fence, ceiling and window.
pub fn payload(fence: &[(f64, f64)], max_alt: f64, from: u64, until: u64) -> Value {
    let coordinates: Vec<Value> = fence
        .iter()
        .map(|&(lat, lon)| json!({ "latitude": lat, "longitude": lon }))
        .collect();
    json!({
        "permissionArtifactId": "PA-TEST-0001",
        "issuer": AUTHORITY,
        "uaDetails": { "uinNo": "UIN0001" },
        "flightParameters": {
            "flightPurpose": "survey",
            "maxAltitude": max_alt,
            "flightStartTime": from,
            "flightEndTime": until,
            "coordinates": coordinates
        }
    })
}

/// The reference scenario payload: square fence, 120 m, [T0, T0 + 3600).
pub fn square_payload() -> Value {
    payload(&SQUARE, MAX_ALT, T0, T0 + WINDOW)
}

/// Serialize and sign `payload` with `key`.
pub fn sign_with(key: &SigningKey, payload: &Value) -> PermissionArtifact {
    let bytes = serde_json::to_vec(payload).expect("json serializes");
    let signature = key.sign(&bytes).to_bytes().to_vec();
    PermissionArtifact::new(bytes, signature)
}

/// [`square_payload`] signed by the authority.
pub fn square_artifact() -> PermissionArtifact {
    sign_with(&authority_key(), &square_payload())
}

/// Sample at `time` and the given position.
pub fn at(time: UtcTimestamp, lat: f64, lon: f64, alt: f64) -> TelemetrySnapshot {
    TelemetrySnapshot::at(time, Position::new(lat, lon, alt))
}

/// Centre of the square at 50 m, ten seconds into the window.
pub fn inside() -> TelemetrySnapshot {
    at(T0 + 10, 5.0, 5.0, 50.0)
}
