//! Fuzz target for the artifact parser.
//!
//! Arbitrary payloads are signed with a trusted key so they pass
//! authentication and reach the parser.
//!
//! ## Running
//!
//! ```bash
//! cd crates/npnt-core
//! cargo +nightly fuzz run fuzz_artifact_parse
//! ```

#![no_main]

use ed25519_dalek::{Signer, SigningKey};
use libfuzzer_sys::fuzz_target;
use npnt_core::{
    EngineConfig, NpntHandle, PermissionApi, PermissionArtifact, Position, TelemetrySnapshot,
    TrustAnchorConfig,
};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    payload: Vec<u8>,
    /// Flip the signature so the untrusted path is exercised too
    corrupt_signature: bool,
    time: Option<u64>,
    position: Option<(f64, f64, f64)>,
}

fuzz_target!(|input: FuzzInput| {
    let key = SigningKey::from_bytes(&[1u8; 32]);
    let config = EngineConfig::default().with_trust_anchor(TrustAnchorConfig::ed25519(
        "DGCA",
        key.verifying_key().to_bytes(),
    ));
    let Ok(mut handle) = NpntHandle::new(config) else {
        return;
    };

    let mut signature = key.sign(&input.payload).to_bytes().to_vec();
    if input.corrupt_signature {
        signature[0] ^= 0x01;
    }
    let artifact = PermissionArtifact::new(input.payload, signature);

    // Must never panic, whatever the payload
    let result = handle.submit_artifact(&artifact);

    // A rejection leaves nothing behind
    if result.is_err() {
        assert!(handle.envelope().is_none());
        assert_eq!(handle.permission_cycle(), 0);
    }
    if input.corrupt_signature {
        assert!(result.is_err());
    }

    // Evaluation against whatever was adopted must not panic either
    let snapshot = TelemetrySnapshot {
        time: input.time,
        position: input.position.map(|(lat, lon, alt)| Position::new(lat, lon, alt)),
    };
    let first = handle.evaluate(snapshot);
    let second = handle.evaluate(snapshot);
    assert!(second.newly_set.is_empty());
    assert_eq!(first.breach, second.breach);
});
