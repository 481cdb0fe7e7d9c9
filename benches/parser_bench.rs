use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tsk_triage::parsers::{parse_file_listing, parse_partitions};

fn listing_fixture(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            format!(
                "0|r/r|{}|/home/user/file_{}.dat|0644|1000|1000|{}|1690000000|1690000001|1690000002\n",
                i + 100,
                i,
                i * 512
            )
        })
        .collect()
}

fn partition_fixture() -> String {
    let mut table = String::from(
        "DOS Partition Table\nOffset Sector: 0\nUnits are in 512-byte sectors\n\n",
    );
    for i in 1..64 {
        table.push_str(&format!(
            "{:03}:  {:010}   {:010}   {:010}  Linux (0x83)\n",
            i,
            i * 2048,
            (i + 1) * 2048 - 1,
            2048
        ));
    }
    table
}

fn bench_file_listing(c: &mut Criterion) {
    let raw = listing_fixture(10_000);
    c.bench_function("parse_file_listing_10k", |b| {
        b.iter(|| parse_file_listing(black_box(&raw)))
    });
}

fn bench_partitions(c: &mut Criterion) {
    let raw = partition_fixture();
    c.bench_function("parse_partitions_64", |b| {
        b.iter(|| parse_partitions(black_box(&raw)))
    });
}

criterion_group!(benches, bench_file_listing, bench_partitions);
criterion_main!(benches);
