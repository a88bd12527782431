//! Benchmarks for structural comparison
//!
//! These benchmarks measure:
//! - Comparison of long sequences of records
//! - Cost of deep nesting
//! - Strict versus lax classification
//! - Digest computation over large reports

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use objdiff::{impl_record, DiffReport, LaxObjectDiff, StrictObjectDiff};
use rust_decimal::Decimal;

// ============================================================================
// Test Data Structures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: i64,
    pub price: Decimal,
    pub note: Option<String>,
}

impl_record!(Position {
    symbol,
    quantity,
    price,
    note,
});

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub owner: String,
    pub positions: Vec<Position>,
}

impl_record!(Portfolio { owner, positions });

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub depth: u32,
    pub child: Option<Box<Level>>,
}

impl_record!(Level { depth, child });

// ============================================================================
// Helper Functions
// ============================================================================

fn create_portfolio(num_positions: usize) -> Portfolio {
    let positions = (0..num_positions)
        .map(|i| Position {
            symbol: format!("SYM{:05}", i),
            quantity: 100 + i as i64,
            price: Decimal::new(1_000 + i as i64, 2),
            note: None,
        })
        .collect();

    Portfolio {
        owner: "fund".to_string(),
        positions,
    }
}

/// Same portfolio with every tenth position repriced
fn create_drifted(num_positions: usize) -> Portfolio {
    let mut portfolio = create_portfolio(num_positions);
    for position in portfolio.positions.iter_mut().step_by(10) {
        position.price += Decimal::new(1, 2);
    }
    portfolio
}

fn create_chain(depth: u32) -> Level {
    (0..depth).fold(Level { depth, child: None }, |child, d| Level {
        depth: d,
        child: Some(Box::new(child)),
    })
}

fn strict() -> StrictObjectDiff {
    StrictObjectDiff::builder()
        .with_descend_into::<Portfolio>()
        .with_descend_into::<Position>()
        .with_descend_into::<Level>()
        .with_builtin_value_types()
        .build()
        .unwrap()
}

fn lax() -> LaxObjectDiff {
    LaxObjectDiff::builder()
        .with_descend_into::<Position>()
        .with_descend_into::<Level>()
        .build()
        .unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_sequence_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_comparison");
    let diff = strict();

    for num_positions in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*num_positions as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_positions),
            num_positions,
            |b, &num_positions| {
                let left = create_portfolio(num_positions);
                let right = create_drifted(num_positions);

                b.iter(|| black_box(diff.compare(&left, &right).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting_depth");
    let diff = strict();

    for depth in [10u32, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            let left = create_chain(depth);
            let right = create_chain(depth + 1);

            b.iter(|| black_box(diff.compare(&left, &right).unwrap()));
        });
    }

    group.finish();
}

fn bench_strict_vs_lax(c: &mut Criterion) {
    let mut group = c.benchmark_group("strict_vs_lax");
    let left = create_portfolio(1000);
    let right = create_drifted(1000);
    let strict = strict();
    let lax = lax();

    group.bench_function("strict", |b| {
        b.iter(|| black_box(strict.compare(&left, &right).unwrap()))
    });

    group.bench_function("lax", |b| {
        b.iter(|| black_box(lax.compare(&left, &right).unwrap()))
    });

    group.bench_function("direct_equality", |b| b.iter(|| black_box(left == right)));

    group.finish();
}

fn bench_report_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_digest");
    let diff = strict();

    for num_positions in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_positions),
            num_positions,
            |b, &num_positions| {
                let report: DiffReport = diff
                    .report(&create_portfolio(num_positions), &create_drifted(num_positions))
                    .unwrap();

                b.iter(|| black_box(report.digest().unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sequence_comparison,
    bench_nesting_depth,
    bench_strict_vs_lax,
    bench_report_digest
);
criterion_main!(benches);
