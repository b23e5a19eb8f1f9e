//! # NPNT Benchmarks
//!
//! | Group | Path |
//! |-------|------|
//! | `npnt/geofence/*` | pnpoly against fence size |
//! | `npnt/verification/*` | authenticate, parse, adopt, reject |
//! | `npnt/tick/*` | per-tick evaluation |

use criterion::{criterion_group, criterion_main};
use npnt_tests::benchmarks::{geofence, tick, verification};

criterion_group!(
    benches,
    geofence::pnpoly_by_vertex_count,
    geofence::pnpoly_random_points,
    verification::authenticate_and_parse,
    verification::adopt_artifact,
    verification::reject_forgery_many_anchors,
    tick::evaluate_in_flight,
    tick::tick_pull_model,
);
criterion_main!(benches);
