use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowgen::{Poll, SnowflakeGenerator, SnowflakeOptions, TWITTER_EPOCH, TimeSource};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

#[derive(Clone, Copy)]
struct FixedMockTime {
    millis: i64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded). One full 12-bit sequence, so a fixed clock never stalls.
const TOTAL_IDS: usize = 4096;

/// Hot path: a fixed clock and a fresh generator per iteration, so every call
/// is a plain sequence increment.
fn bench_hot_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("hot_path");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("generate/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = SnowflakeGenerator::with_time(
                    1,
                    1,
                    SnowflakeOptions::default(),
                    FixedMockTime {
                        millis: TWITTER_EPOCH + 1,
                    },
                )
                .unwrap();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.generate().unwrap());
                }
            }
            start.elapsed()
        });
    });

    group.bench_function(format!("try_poll/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = SnowflakeGenerator::with_time(
                    1,
                    1,
                    SnowflakeOptions::default(),
                    FixedMockTime {
                        millis: TWITTER_EPOCH + 1,
                    },
                )
                .unwrap();
                for _ in 0..TOTAL_IDS {
                    match generator.try_poll().unwrap() {
                        Poll::Ready { id } => {
                            black_box(id);
                        }
                        Poll::Pending { .. } => unreachable!(),
                    }
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Realistic wall clock, including spins on exhausted milliseconds.
fn bench_system_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = SnowflakeGenerator::new(1, 1).unwrap();
    group.bench_function(format!("generate/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate().unwrap());
            }
        });
    });

    group.finish();
}

/// Lock contention: one shared generator, one thread per core.
fn bench_contended(c: &mut Criterion) {
    let threads = num_cpus::get();
    let mut group = c.benchmark_group("contended");
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    let generator = SnowflakeGenerator::new(1, 1).unwrap();
    group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let barrier = Arc::new(Barrier::new(threads + 1));
            let start = scope(|s| {
                for _ in 0..threads {
                    let generator = generator.clone();
                    let barrier = Arc::clone(&barrier);
                    s.spawn(move || {
                        barrier.wait();
                        for _ in 0..iters {
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.generate().unwrap());
                            }
                        }
                    });
                }
                barrier.wait();
                Instant::now()
            });
            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_hot_path, bench_system_clock, bench_contended);
criterion_main!(benches);
