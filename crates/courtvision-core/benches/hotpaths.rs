use criterion::{black_box, criterion_group, criterion_main, Criterion};

use courtvision_core::{detect_shot_frames, interpolate_ball_stream, Bbox, ShotConfig};

/// Sparse ball stream over a long rally: a detection every third frame, the
/// center-y following a slow sine so shot detection has work to do.
fn sparse_rally(n_frames: usize) -> Vec<Option<Bbox>> {
    (0..n_frames)
        .map(|i| {
            if i % 3 != 0 {
                return None;
            }
            let y = 400.0 + 250.0 * (i as f64 / 40.0).sin();
            Some(Bbox::new(630.0, y - 5.0, 640.0, y + 5.0))
        })
        .collect()
}

fn bench_interpolate(c: &mut Criterion) {
    let stream = sparse_rally(10_000);
    c.bench_function("interpolate_ball_stream_10k", |b| {
        b.iter(|| interpolate_ball_stream(black_box(&stream)))
    });
}

fn bench_shot_detection(c: &mut Criterion) {
    let dense = interpolate_ball_stream(&sparse_rally(10_000));
    let cfg = ShotConfig::default();
    c.bench_function("detect_shot_frames_10k", |b| {
        b.iter(|| detect_shot_frames(black_box(&dense), black_box(&cfg)))
    });
}

criterion_group!(benches, bench_interpolate, bench_shot_detection);
criterion_main!(benches);
