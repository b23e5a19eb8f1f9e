//! # Artifact Verification Benchmarks
//!
//! Authentication, parsing and full adoption of a signed artifact,
//! including rejection of forgeries against a crowded trust store.

use crate::benchmarks::geofence::circular_fence;
use crate::fixtures::{authority_key, config, handle, payload, sign_with, MAX_ALT, T0, WINDOW};
use criterion::{black_box, BenchmarkId, Criterion};
use ed25519_dalek::SigningKey;
use npnt_core::{
    EngineConfig, NpntHandle, PermissionApi, TrustAnchorConfig, TrustStore, VerifiedArtifact,
};

fn fence_pairs(n: usize) -> Vec<(f64, f64)> {
    circular_fence(n)
        .into_iter()
        .map(|v| (v.latitude, v.longitude))
        .collect()
}

pub fn authenticate_and_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("npnt/verification/authenticate_parse");
    let store: TrustStore = config().validate().expect("valid config");

    for n in [4usize, 64, 512] {
        let artifact = sign_with(
            &authority_key(),
            &payload(&fence_pairs(n), MAX_ALT, T0, T0 + WINDOW),
        );
        group.bench_with_input(BenchmarkId::new("vertices", n), &artifact, |b, artifact| {
            b.iter(|| {
                let verified = VerifiedArtifact::authenticate(black_box(artifact), &store)
                    .expect("authentic");
                black_box(verified.parse(None).expect("parses"))
            })
        });
    }

    group.finish();
}

pub fn adopt_artifact(c: &mut Criterion) {
    let mut group = c.benchmark_group("npnt/verification/adopt");
    let artifact = sign_with(&authority_key(), &payload(&fence_pairs(16), MAX_ALT, T0, T0 + WINDOW));
    let mut handle = handle();

    group.bench_function("submit_artifact", |b| {
        b.iter(|| black_box(handle.submit_artifact(&artifact).is_ok()))
    });

    group.finish();
}

pub fn reject_forgery_many_anchors(c: &mut Criterion) {
    let mut group = c.benchmark_group("npnt/verification/forgery");
    let forged = sign_with(
        &SigningKey::from_bytes(&[0xee; 32]),
        &payload(&fence_pairs(4), MAX_ALT, T0, T0 + WINDOW),
    );

    for anchors in [1u8, 8, 32] {
        let config = (0..anchors).fold(EngineConfig::for_testing(), |config, i| {
            config.with_trust_anchor(TrustAnchorConfig::ed25519(
                format!("AUTHORITY-{i}"),
                SigningKey::from_bytes(&[i; 32]).verifying_key().to_bytes(),
            ))
        });
        let mut handle = NpntHandle::new(config).expect("valid config");

        group.bench_with_input(BenchmarkId::new("anchors", anchors), &forged, |b, forged| {
            b.iter(|| black_box(handle.submit_artifact(forged).is_err()))
        });
    }

    group.finish();
}
