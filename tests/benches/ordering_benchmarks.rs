//! # Ordering Benchmarks
//!
//! | Path | Rows written per move |
//! |------|-----------------------|
//! | Interval shift | `|to - from| + 1` |
//! | Splice and rewrite | every row of the scope |
//!
//! The second path is what a list-splice implementation pays; it is kept here
//! only as the baseline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mc_01_ordered_list::algorithms::{plan_move, plan_resequence};
use mc_01_ordered_list::{
    InMemoryRankStore, OrderedListApi, OrderedListManager, Rank, RankBase, RankUpdate, RankedEntity,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const SIZES: [usize; 4] = [10, 100, 1_000, 10_000];

fn scope(len: usize) -> Vec<RankedEntity<u32, u32>> {
    (0..len)
        .map(|i| RankedEntity::new(0, i as u32, i as Rank))
        .collect()
}

/// Remove the mover, insert it at the target index, rewrite every rank.
fn splice_and_rewrite(current: &[RankedEntity<u32, u32>], mover: u32, target: usize) -> Vec<RankUpdate<u32>> {
    let mut order: Vec<u32> = current.iter().map(|e| e.id).collect();
    if let Some(index) = order.iter().position(|id| *id == mover) {
        let moved = order.remove(index);
        order.insert(target, moved);
    }
    order
        .into_iter()
        .enumerate()
        .map(|(rank, id)| RankUpdate::new(id, rank as Rank))
        .collect()
}

fn bench_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc-01-move-planning");
    group.measurement_time(Duration::from_secs(5));

    for len in SIZES {
        let current = scope(len);
        let mut rng = StdRng::seed_from_u64(7);
        let moves: Vec<(u32, usize)> = (0..64)
            .map(|_| (rng.gen_range(0..len as u32), rng.gen_range(0..len)))
            .collect();

        group.throughput(Throughput::Elements(moves.len() as u64));
        group.bench_with_input(BenchmarkId::new("interval_shift", len), &moves, |b, moves| {
            b.iter(|| {
                for (mover, target) in moves {
                    let _ = black_box(plan_move(&current, mover, *target as Rank, RankBase::Zero));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("splice_rewrite", len), &moves, |b, moves| {
            b.iter(|| {
                for (mover, target) in moves {
                    black_box(splice_and_rewrite(&current, *mover, *target));
                }
            })
        });
    }

    group.finish();
}

fn bench_resequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc-01-resequence");

    for len in SIZES {
        // Legacy 1-based ranks with every tenth row missing
        let damaged: Vec<RankedEntity<u32, u32>> = (0..len)
            .map(|i| RankedEntity::new(0, i as u32, (i + 1 + i / 10) as Rank))
            .collect();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &damaged, |b, damaged| {
            b.iter(|| black_box(plan_resequence(damaged, RankBase::Zero)))
        });
    }

    group.finish();
}

fn bench_manager_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc-01-manager-move");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime");

    for len in [100usize, 1_000] {
        let manager = OrderedListManager::new(InMemoryRankStore::<u32, u32>::pessimistic());
        runtime.block_on(async {
            for id in 0..len as u32 {
                let _ = manager.append(&0, id).await;
            }
        });

        // Alternate between two positions so every iteration is a real move
        let mover = (len / 2) as u32;
        let mut flip = false;
        group.bench_function(BenchmarkId::new("move_to", len), |b| {
            b.iter(|| {
                flip = !flip;
                let target = if flip { 0 } else { (len / 2) as Rank };
                black_box(runtime.block_on(manager.move_to(&0, &mover, target)).is_ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_planning, bench_resequence, bench_manager_move);
criterion_main!(benches);
