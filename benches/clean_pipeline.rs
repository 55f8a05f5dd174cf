//! Benchmarks for the transaction cleaning pipeline
//!
//! Measures a full run (load, clean, write) over synthetic exports of
//! increasing size, with a share of invalid and duplicate rows.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ecommerce_cleaner::{CleanerConfig, TransactionCleaner};
use std::fmt::Write as _;
use std::hint::black_box;
use tempfile::TempDir;

const HEADER: &str =
    "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country";

/// Build a synthetic export with returns, free items, blanks and repeats
fn synthetic_export(rows: usize) -> String {
    let mut content = String::from(HEADER);
    content.push('\n');

    for i in 0..rows {
        // Every tenth row repeats the previous line exactly
        let k = if i % 10 == 9 { i - 1 } else { i };
        let quantity: i64 = if k % 17 == 0 { -1 } else { (k % 24 + 1) as i64 };
        let price = if k % 23 == 0 { 0.0 } else { 0.5 + (k % 40) as f64 * 0.25 };
        let customer = if k % 11 == 0 {
            String::new()
        } else {
            format!("{}.0", 12000 + k % 900)
        };
        let invoice = 536000 + k;
        let minute = (invoice % 60) as u32;
        let day = (invoice % 28) as u32 + 1;

        let _ = writeln!(
            content,
            "{},{},PRODUCT {},{},2011-03-{:02} 10:{:02},{},{},United Kingdom",
            invoice,
            20000 + invoice % 500,
            invoice % 500,
            quantity,
            day,
            minute,
            price,
            customer
        );
    }

    content
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_pipeline");
    group.sample_size(10);

    for size in &[1_000usize, 10_000, 50_000] {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("datacamp_ecommerce.csv");
        let output = temp_dir.path().join("cleaned_ecommerce_data.csv");
        std::fs::write(&input, synthetic_export(*size)).unwrap();

        let config = CleanerConfig::default()
            .with_input_path(input)
            .with_output_path(output)
            .quiet();
        let cleaner = TransactionCleaner::new(config).unwrap();

        group.bench_with_input(BenchmarkId::new("run", size), &cleaner, |b, cleaner| {
            b.iter(|| black_box(cleaner.run().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_run);
criterion_main!(benches);
