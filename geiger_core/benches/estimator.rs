use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use geiger_core::{rate_to_percent, ticks_to_rate, Zone};

// Synthetic window counts: a decaying source plus shot noise
fn synth_counts(n: usize, seed: u32) -> Vec<u32> {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_u32 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        x
    };
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let base = 2_000.0 * (-(i as f32) / 10_000.0).exp();
        let noise = next_u32() % 40;
        v.push(base as u32 + noise);
    }
    v
}

pub fn bench_percent_pipeline(c: &mut Criterion) {
    let mut g = c.benchmark_group("percent_pipeline");
    // Allow quick tweaking without CLI flags (Criterion 0.5):
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p geiger_core --bench estimator
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

    let counts = synth_counts(50_000, 0xC0FFEE);

    g.bench_function("ticks_to_percent", |b| {
        b.iter_batched(
            || counts.clone(),
            |cs| {
                let mut acc = 0.0f32;
                for &ticks in &cs {
                    acc += rate_to_percent(ticks_to_rate(black_box(ticks)), 100.0);
                }
                black_box(acc);
            },
            BatchSize::SmallInput,
        )
    });

    g.bench_function("zone_classification", |b| {
        b.iter_batched(
            || counts.clone(),
            |cs| {
                let mut hot = 0usize;
                for &ticks in &cs {
                    let p = rate_to_percent(ticks_to_rate(ticks), 100.0);
                    if Zone::of_percent(black_box(p), 100.0) == Zone::Elevated {
                        hot += 1;
                    }
                }
                black_box(hot);
            },
            BatchSize::SmallInput,
        )
    });

    g.finish();
}

criterion_group!(estimator, bench_percent_pipeline);
criterion_main!(estimator);
