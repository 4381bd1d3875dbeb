/// Performance benchmarks for bulk scanning
///
/// Scans the demo export held in memory, so only line splitting and
/// decoding are measured. The second group repeats the demo file to see how
/// the scan scales with stream size.
///
/// Run with: cargo bench --bench bulk_scan
use bcs_client::bulk::{scan_bulk, ScanOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

fn demo_bulk() -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("demo_bcs_bulk.jsonl");
    std::fs::read(path).expect("demo fixture should be readable")
}

fn bench_demo_file(c: &mut Criterion) {
    let rt = Runtime::new().expect("Failed to create runtime");
    let data = demo_bulk();

    let mut group = c.benchmark_group("bulk_scan");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("demo_file", |b| {
        b.to_async(&rt).iter(|| async {
            let results = scan_bulk(black_box(data.as_slice()), ScanOptions::default())
                .await
                .expect("demo file should scan");
            black_box(results.line_count)
        });
    });

    group.finish();
}

fn bench_stream_size(c: &mut Criterion) {
    let rt = Runtime::new().expect("Failed to create runtime");
    let data = demo_bulk();

    let mut group = c.benchmark_group("bulk_scan_stream_size");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    for copies in [1usize, 10, 50].iter() {
        let stream = data.repeat(*copies);
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(copies), &stream, |b, stream| {
            b.to_async(&rt).iter(|| async {
                let results = scan_bulk(black_box(stream.as_slice()), ScanOptions::default())
                    .await
                    .expect("repeated demo file should scan");
                black_box(results.line_count)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_demo_file, bench_stream_size);
criterion_main!(benches);
