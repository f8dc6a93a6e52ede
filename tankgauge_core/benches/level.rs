use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveDateTime};
use tankgauge_core::{DailyUsageTracker, TankGeometry};

// Generate a synthetic day of depth readings: slow drain with additive noise
fn synth_depths(n: usize, noise_amp: f64, seed: u32) -> Vec<f64> {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_f64 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        f64::from(x) / (f64::from(u32::MAX) + 1.0)
    };
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let drain = 20.0 + 60.0 * (i as f64) / (n as f64);
        let noise = (next_f64() * 2.0 - 1.0) * noise_amp;
        v.push(drain + noise);
    }
    v
}

fn stamp(i: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 7, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::seconds(i as i64)
}

pub fn bench_level_and_usage(c: &mut Criterion) {
    let mut g = c.benchmark_group("level_and_usage");
    // Allow quick tweaking without CLI flags (Criterion 0.5):
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p tankgauge_core --bench level
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let geometry = TankGeometry::new(120.0, 250.0).unwrap();
    let depths = synth_depths(10_000, 0.5, 0xC0FFEE);

    g.bench_function("level_at_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0f64;
            for &d in &depths {
                acc += geometry.level_at(black_box(d)).volume_litres;
            }
            black_box(acc);
        })
    });

    let volumes: Vec<f64> = depths
        .iter()
        .map(|&d| geometry.level_at(d).volume_litres)
        .collect();

    g.bench_function("tracker_observe_stream", |b| {
        b.iter_batched(
            || volumes.clone(),
            |vs| {
                let mut tracker = DailyUsageTracker::new();
                for (i, v) in vs.into_iter().enumerate() {
                    tracker.observe(stamp(i), black_box(v)).unwrap();
                }
                black_box(tracker.daily_usage_litres());
            },
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

criterion_group!(level, bench_level_and_usage);
criterion_main!(level);
