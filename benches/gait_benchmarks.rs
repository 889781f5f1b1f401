use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gait_core::events::{organize, EventKind, EventSide};
use gait_core::{segment, AnalysisConfig, RawRecording, RecordingBuilder, Resampler, TrialAnalysis};
use rand::prelude::*;

const CYCLE_LENGTHS: &[usize] = &[120, 1200, 12_000];
const TARGET_COUNTS: &[usize] = &[51, 101, 1000];

fn noisy_signal(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (i as f64 * 0.02).sin() * 40.0 + rng.gen_range(-1.0..1.0))
        .collect()
}

fn synthetic_trial(rng: &mut StdRng) -> RawRecording {
    let motion_frames = 400;
    let analog_frames = 4000;

    let mut builder = RecordingBuilder::new("bench")
        .point_clock(100.0, 0)
        .analog_clock(1000.0, 0)
        .event(1.00, "Left", "Foot Strike")
        .event(1.10, "Right", "Foot Off")
        .event(1.50, "Right", "Foot Strike")
        .event(1.60, "Left", "Foot Off")
        .event(2.20, "Left", "Foot Strike")
        .event(2.30, "Right", "Foot Off")
        .event(2.70, "Right", "Foot Strike");

    for label in ["LPelvisAngles", "RPelvisAngles", "LHipAngles", "RHipAngles", "LKneeAngles", "RKneeAngles"] {
        let axes = [
            noisy_signal(rng, motion_frames),
            noisy_signal(rng, motion_frames),
            noisy_signal(rng, motion_frames),
        ];
        builder = builder.point_channel(label, axes);
    }
    for i in 1..=12 {
        builder = builder.analog_channel(&format!("EMG{}", i), "EMG Channel", "V", noisy_signal(rng, analog_frames));
    }

    // Generated channels are consistent, so building cannot fail
    builder.build().unwrap()
}

fn benchmark_resampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    let mut rng = StdRng::seed_from_u64(7);

    for &length in CYCLE_LENGTHS {
        let signal = noisy_signal(&mut rng, length);
        for &target in TARGET_COUNTS {
            group.throughput(Throughput::Elements(length as u64));
            group.bench_with_input(
                BenchmarkId::new("fourier", format!("{}_to_{}", length, target)),
                &target,
                |b, &target| {
                    let mut resampler = Resampler::new();
                    b.iter(|| resampler.resample(black_box(&signal), target).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn benchmark_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for &strides in &[1usize, 10, 100] {
        let mut times = Vec::new();
        let mut sides = Vec::new();
        let mut kinds = Vec::new();
        for stride in 0..strides {
            let t0 = stride as f64 * 1.2;
            for (offset, side, kind) in [
                (0.0, EventSide::Left, EventKind::FootStrike),
                (0.1, EventSide::Right, EventKind::FootOff),
                (0.6, EventSide::Right, EventKind::FootStrike),
                (0.7, EventSide::Left, EventKind::FootOff),
            ] {
                times.push(t0 + offset);
                sides.push(side);
                kinds.push(kind);
            }
        }

        group.bench_with_input(BenchmarkId::new("organize_and_segment", strides), &strides, |b, _| {
            b.iter(|| {
                let events = organize(&times, &sides, &kinds, 100.0, 0, 1000.0, 0).unwrap();
                segment(black_box(&events))
            });
        });
    }

    group.finish();
}

fn benchmark_trial(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let recording = synthetic_trial(&mut rng);
    let config = AnalysisConfig::default();

    c.bench_function("trial_from_recording", |b| {
        b.iter(|| TrialAnalysis::from_recording(black_box(&recording), &config).unwrap());
    });

    let analysis = TrialAnalysis::from_recording(&recording, &config).unwrap();
    c.bench_function("synergy_input", |b| {
        b.iter(|| analysis.synergy_input().unwrap());
    });
}

criterion_group!(benches, benchmark_resampling, benchmark_segmentation, benchmark_trial);
criterion_main!(benches);
