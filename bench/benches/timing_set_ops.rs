use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};

use dysuc::DynamicRankBitset;

const SAMPLE_SIZE: usize = 30;
const WARM_UP_TIME: Duration = Duration::from_secs(5);
const MEASURE_TIME: Duration = Duration::from_secs(10);

const SEED_LEFT: u64 = 334;
const SEED_RIGHT: u64 = 114514;

const NUM_BITS: &[usize] = &[1 << 10, 1 << 15, 1 << 20];

fn gen_random_bits(len: usize, p: f64, seed: u64) -> Vec<bool> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_bool(p)).collect()
}

fn criterion_set_ops_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_set_ops_50");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    perform_set_ops(&mut group, 0.5);
}

fn criterion_set_ops_1(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_set_ops_1");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    perform_set_ops(&mut group, 0.01);
}

fn perform_set_ops(group: &mut BenchmarkGroup<WallTime>, p: f64) {
    for &nbits in NUM_BITS {
        let left = DynamicRankBitset::from_bits(gen_random_bits(nbits, p, SEED_LEFT));
        let right = DynamicRankBitset::from_bits(gen_random_bits(nbits, p, SEED_RIGHT));

        let nbits_str = format!("n_{nbits}");

        group.bench_function(format!("{nbits_str}/dysuc/merge"), |b| {
            b.iter(|| left.to_merged(&right).unwrap());
        });

        group.bench_function(format!("{nbits_str}/dysuc/intersect"), |b| {
            b.iter(|| left.to_intersected(&right).unwrap());
        });

        group.bench_function(format!("{nbits_str}/dysuc/symmetric_difference"), |b| {
            b.iter(|| left.to_symmetric_difference(&right).unwrap());
        });
    }
}

criterion_group!(benches, criterion_set_ops_50, criterion_set_ops_1);

criterion_main!(benches);
