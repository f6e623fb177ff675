use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motion_curves_core::{
    parse_easing, ArcMode, ArcSpline, Cycles, LinearCurve, MonoSpline, Spline, WaveShape,
};

criterion_main!(benches);

criterion_group!(benches, keyed_curves, paths, oscillators_and_easing);

const FRAMES: usize = 240;

fn frame_times() -> Vec<f64> {
    // One second of frames plus some overshoot on either side.
    (0..FRAMES)
        .map(|i| -0.1 + 1.2 * i as f64 / (FRAMES - 1) as f64)
        .collect()
}

fn waypoints() -> (Vec<f64>, Vec<[f64; 3]>) {
    let times: Vec<f64> = (0..12).map(|i| i as f64 / 11.0).collect();
    let points = times
        .iter()
        .map(|t| [t * 100.0, (t * 7.0).sin() * 40.0, t * t])
        .collect();
    (times, points)
}

fn keyed_curves(c: &mut Criterion) {
    let (times, points) = waypoints();
    let mono = MonoSpline::new(&times, &points).expect("mono");
    let linear = LinearCurve::new(&times, &points).expect("linear");
    let frames = frame_times();

    c.bench_function("mono_pos_into_240_frames", |b| {
        let mut out = [0.0; 3];
        b.iter(|| {
            for &t in &frames {
                mono.pos_into(black_box(t), &mut out);
                black_box(&out);
            }
        })
    });

    c.bench_function("linear_pos_into_240_frames", |b| {
        let mut out = [0.0; 3];
        b.iter(|| {
            for &t in &frames {
                linear.pos_into(black_box(t), &mut out);
                black_box(&out);
            }
        })
    });
}

fn paths(c: &mut Criterion) {
    let times = [0.0, 0.25, 0.5, 0.75, 1.0];
    let points = [[0.0, 0.0], [40.0, 60.0], [90.0, 20.0], [120.0, 80.0], [200.0, 0.0]];
    let modes = [ArcMode::StartVertical, ArcMode::StartFlip, ArcMode::StartFlip, ArcMode::ArcBelow];
    let arc = ArcSpline::new(&modes, &times, &points).expect("arc");
    let natural = Spline::new(&points).expect("natural");
    let frames = frame_times();

    c.bench_function("arc_sample_240_frames", |b| {
        b.iter(|| {
            for &t in &frames {
                black_box(arc.sample(black_box(t)));
            }
        })
    });

    c.bench_function("natural_pos_into_240_frames", |b| {
        let mut out = [0.0; 2];
        b.iter(|| {
            for &t in &frames {
                natural.pos_into(black_box(t), &mut out);
                black_box(&out);
            }
        })
    });

    c.bench_function("arc_build", |b| {
        b.iter(|| black_box(ArcSpline::new(&modes, &times, &points).expect("arc")))
    });
}

fn oscillators_and_easing(c: &mut Criterion) {
    let mut cycles = Cycles::with_wave(WaveShape::Triangle);
    for (position, period) in [(0.0, 1.0), (0.3, 4.0), (0.7, 2.0), (1.0, 1.0)] {
        cycles.add_point(position, period);
    }
    cycles.normalize().expect("normalize");
    let standard = parse_easing("standard").expect("preset");
    let frames = frame_times();

    c.bench_function("cycles_value_240_frames", |b| {
        b.iter(|| {
            for &t in &frames {
                black_box(cycles.value(black_box(t), 0.25));
            }
        })
    });

    c.bench_function("cubic_ease_240_frames", |b| {
        b.iter(|| {
            for &t in &frames {
                black_box(standard.ease(black_box(t)));
            }
        })
    });
}
