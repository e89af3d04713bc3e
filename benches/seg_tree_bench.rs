// Benchmark suite for the lazy segment tree
//
// Compares the two pending-delta strategies on the same workloads:
// - BitCount: overwrite rule, older deltas cascade on push
// - RangeAdd: compose rule, deltas fold in place

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use lazytree::lazy::SegTree;
use lazytree::lazy::add::RangeAdd;
use lazytree::lazy::bits::{BitCount, BitOp};
use lazytree::segment::Segment;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];
const OPS: usize = 1_000;

// =============================================================================
// Benchmark Helpers
// =============================================================================

/// Random ordered ranges, seeded for reproducibility.
fn random_ranges(n: usize, count: usize, seed: u64) -> Vec<Segment> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            Segment::new(a.min(b), a.max(b))
        })
        .collect()
}

fn random_bits(n: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| if rng.gen_bool(0.5) { b'1' } else { b'0' }).collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in SIZES {
        let bits = random_bits(size, 1);
        let values: Vec<i64> = (0..size as i64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("BitCount", size), &bits, |b, bits| {
            b.iter(|| SegTree::new(black_box(bits.as_slice()), BitCount).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("RangeAdd", size), &values, |b, values| {
            b.iter(|| SegTree::new(black_box(values.as_slice()), RangeAdd).unwrap());
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for size in SIZES {
        let ranges = random_ranges(size, OPS, 2);
        group.throughput(Throughput::Elements(OPS as u64));

        let bits = random_bits(size, 3);
        let mut tree = SegTree::new(bits, BitCount).unwrap();
        group.bench_with_input(BenchmarkId::new("BitCount", size), &ranges, |b, ranges| {
            b.iter(|| {
                for range in ranges {
                    black_box(tree.query(*range));
                }
            });
        });
    }

    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_then_query");

    for size in SIZES {
        let ranges = random_ranges(size, OPS, 4);
        let probes = random_ranges(size, OPS, 5);
        group.throughput(Throughput::Elements(2 * OPS as u64));

        group.bench_with_input(BenchmarkId::new("BitCount", size), &size, |b, &size| {
            b.iter_batched(
                || SegTree::new(vec![b'0'; size], BitCount).unwrap(),
                |mut tree| {
                    let ops = [BitOp::Fill, BitOp::Invert, BitOp::Empty, BitOp::Invert];
                    for (i, (range, probe)) in ranges.iter().zip(&probes).enumerate() {
                        tree.update(*range, ops[i % ops.len()]);
                        black_box(tree.query(*probe));
                    }
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("RangeAdd", size), &size, |b, &size| {
            b.iter_batched(
                || SegTree::new(vec![0i64; size], RangeAdd).unwrap(),
                |mut tree| {
                    for (i, (range, probe)) in ranges.iter().zip(&probes).enumerate() {
                        tree.update(*range, i as i64 - 500);
                        black_box(tree.query(*probe));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_mixed);
criterion_main!(benches);
