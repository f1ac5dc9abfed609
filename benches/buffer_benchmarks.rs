//! Benchmarks for document editing and undo.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quill_buffer::{Change, LineStore, UndoLog};
use quill_core::{Direction, Document};

/// Generates a large text string for benchmarking.
fn generate_large_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("Line {}: This is a sample line of text for benchmarking purposes.\n", i))
        .collect()
}

/// Benchmarks parsing text into a line store.
fn bench_store_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_creation");

    for size in [100, 1000, 10000, 100000].iter() {
        let text = generate_large_text(*size);

        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter(|| {
                let store = LineStore::parse(black_box(text.as_str()));
                black_box(store)
            })
        });
    }

    group.finish();
}

/// Benchmarks typing a word into the middle of a large document.
fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");

    let base = LineStore::parse(&generate_large_text(10000));

    group.bench_function("type_word_mid_document", |b| {
        b.iter_with_setup(
            || {
                let mut doc = Document::from_lines(base.iter());
                for _ in 0..5000 {
                    doc.move_cursor(Direction::Down);
                }
                doc
            },
            |mut doc| {
                for ch in "inserted text".chars() {
                    doc.insert_char(black_box(ch)).unwrap();
                }
                black_box(doc)
            },
        )
    });

    group.finish();
}

/// Benchmarks the coalescing step on its own.
fn bench_coalescing(c: &mut Criterion) {
    let mut group = c.benchmark_group("coalescing");

    group.bench_function("submit_1000_contiguous_inserts", |b| {
        b.iter(|| {
            let mut log = UndoLog::new();
            for col in 1..=1000 {
                log.submit(black_box(Change::Insert { row: 0, col, ch: 'x' }));
            }
            black_box(log)
        })
    });

    group.bench_function("submit_1000_backspaces", |b| {
        b.iter(|| {
            let mut log = UndoLog::new();
            for col in (0..1000).rev() {
                log.submit(black_box(Change::Delete { row: 0, col, ch: 'x' }));
            }
            black_box(log)
        })
    });

    group.finish();
}

/// Benchmarks undo.
fn bench_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo");

    group.bench_function("undo_typed_run", |b| {
        b.iter_with_setup(
            || {
                let mut doc = Document::new();
                for ch in "test ".repeat(100).chars() {
                    doc.insert_char(ch).unwrap();
                }
                doc
            },
            |mut doc| {
                doc.undo().unwrap();
                black_box(doc)
            },
        )
    });

    group.bench_function("undo_100_line_splits", |b| {
        b.iter_with_setup(
            || {
                let mut doc = Document::new();
                for _ in 0..100 {
                    doc.insert_char('a').unwrap();
                    doc.split_line_at_cursor().unwrap();
                }
                doc
            },
            |mut doc| {
                while doc.can_undo() {
                    doc.undo().unwrap();
                }
                black_box(doc)
            },
        )
    });

    group.finish();
}

/// Benchmarks line access.
fn bench_line_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_access");

    let doc = Document::from_lines(LineStore::parse(&generate_large_text(100000)).iter());

    group.bench_function("get_lines_window", |b| {
        b.iter(|| {
            let lines = doc.get_lines(black_box(50000), black_box(50)).unwrap();
            black_box(lines.len())
        })
    });

    group.bench_function("iterate_all_lines", |b| {
        b.iter(|| {
            let count = doc.lines().iter().count();
            black_box(count)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_store_creation,
    bench_typing,
    bench_coalescing,
    bench_undo,
    bench_line_access,
);

criterion_main!(benches);
