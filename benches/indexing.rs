//! Indexing benchmarks on a synthetic corpus.
//!
//! Run with: `cargo bench`
//! Save baseline: `cargo bench -- --save-baseline main`
//! Compare: `cargo bench -- --baseline main`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cxi::index::SuffixIndex;
use cxi::symbols::SymbolTable;
use cxi::utils::IndexerConfig;
use std::time::Duration;

/// Zipf-ish token stream with a boundary every 12 to 24 tokens
fn synthetic_tokens(count: usize) -> Vec<String> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut tokens = Vec::with_capacity(count);
    let mut until_boundary = 12;
    for _ in 0..count {
        if until_boundary == 0 {
            tokens.push(String::new());
            until_boundary = 12 + (next() % 13) as usize;
            continue;
        }
        let rank = (next() % 5000) as f64;
        tokens.push(format!("w{}", (rank * rank / 5000.0) as u64));
        until_boundary -= 1;
    }
    tokens
}

fn build(tokens: &[String], config: IndexerConfig) -> SuffixIndex {
    let mut index = SuffixIndex::with_config(config).expect("Failed to create index");
    for token in tokens {
        index.append_token(token.as_bytes()).expect("Failed to append token");
    }
    index
}

fn bench_interning(c: &mut Criterion) {
    let tokens = synthetic_tokens(200_000);

    c.bench_function("intern_200k_tokens", |b| {
        b.iter(|| {
            let mut table = SymbolTable::new().expect("Failed to create table");
            for token in &tokens {
                black_box(table.intern(token.as_bytes()).expect("Failed to intern"));
            }
            table
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));

    for &size in &[10_000usize, 200_000] {
        let tokens = synthetic_tokens(size);
        for parallel in [false, true] {
            let config = IndexerConfig {
                parallel_sort: parallel,
                parallel_threshold: 0,
                show_progress: false,
                ..Default::default()
            };
            let index = build(&tokens, config);
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, size), &index, |b, index| {
                b.iter_batched(
                    || index.clone(),
                    |mut index| {
                        index.sort().expect("Failed to sort");
                        index
                    },
                    criterion::BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_interning, bench_sort);
criterion_main!(benches);
