//! # Tick Benchmarks
//!
//! Steady-state evaluation cost for an armed aircraft inside its envelope
//! and for one that has already breached.

use crate::fixtures::{at, handle, square_artifact, T0};
use criterion::{black_box, Criterion};
use npnt_core::{AircraftEvent, ManualTelemetry, NpntHandle, PermissionApi, Position};

fn in_flight() -> NpntHandle {
    let mut handle = handle();
    handle.submit_artifact(&square_artifact()).expect("authentic");
    handle.evaluate(at(T0 + 1, 5.0, 5.0, 50.0));
    handle.apply_event(AircraftEvent::ArmRequested).expect("gate open");
    handle.apply_event(AircraftEvent::TakeoffDetected).expect("armed");
    handle
}

pub fn evaluate_in_flight(c: &mut Criterion) {
    let mut group = c.benchmark_group("npnt/tick/evaluate");

    let mut compliant = in_flight();
    group.bench_function("inside_envelope", |b| {
        b.iter(|| black_box(compliant.evaluate(black_box(at(T0 + 60, 5.0, 5.0, 50.0)))))
    });

    let mut breached = in_flight();
    breached.evaluate(at(T0 + 60, 20.0, 20.0, 50.0));
    group.bench_function("after_breach", |b| {
        b.iter(|| black_box(breached.evaluate(black_box(at(T0 + 61, 20.0, 20.0, 50.0)))))
    });

    group.finish();
}

pub fn tick_pull_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("npnt/tick/pull");
    let mut handle = in_flight();
    let mut telemetry = ManualTelemetry::new();
    telemetry.move_to(T0 + 60, Position::new(5.0, 5.0, 50.0));

    group.bench_function("manual_telemetry", |b| {
        b.iter(|| black_box(handle.tick(&mut telemetry)))
    });

    group.finish();
}
