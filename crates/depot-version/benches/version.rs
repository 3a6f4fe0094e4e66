use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depot_version::{ComparableVersion, VersionRange, Versions};

fn bench_parse_versions(c: &mut Criterion) {
    let versions = [
        "1.2.23.0",
        "1.0",
        "2.0.beta",
        "10.4.3.1207",
        "0.9.9.rc1",
        "3.1.0.0",
    ];

    c.bench_function("parse_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(ComparableVersion::parse(black_box(version)).ok());
            }
        })
    });
}

fn bench_parse_ranges(c: &mut Criterion) {
    let ranges = [
        "[1.2,)",
        "(,1.0],[1.2,)",
        "[1.0,2.0)",
        "[1.2,1.2]",
        "(,1.0),(1.0,2.0),(2.0,)",
        "[,]",
    ];

    c.bench_function("parse_ranges", |b| {
        b.iter(|| {
            for range in ranges {
                black_box(VersionRange::parse(black_box(range)).ok());
            }
        })
    });
}

fn bench_is_in_range(c: &mut Criterion) {
    let range = VersionRange::parse("(,1.0],[1.2,2.0),[3.0,)").expect("parse range");
    let candidates: Vec<ComparableVersion> = ["0.9", "1.1.2", "1.5", "2.5", "3.0.1", "1.0.0.0"]
        .iter()
        .map(|v| ComparableVersion::parse(v).expect("parse version"))
        .collect();

    c.bench_function("is_in_range", |b| {
        b.iter(|| {
            for candidate in &candidates {
                black_box(range.is_in_range(black_box(candidate)));
            }
        })
    });
}

fn bench_max_satisfying(c: &mut Criterion) {
    let listing = [
        "1.0", "1.1", "1.2", "1.2.1", "1.10", "2.0.beta", "2.0", "2.1.3", "3.0", "3.0.1",
    ];
    let range = VersionRange::parse("[1.2,3.0)").expect("parse range");

    c.bench_function("max_satisfying", |b| {
        b.iter(|| {
            black_box(Versions::max_satisfying(black_box(&listing), black_box(&range)));
        })
    });
}

criterion_group!(
    benches,
    bench_parse_versions,
    bench_parse_ranges,
    bench_is_in_range,
    bench_max_satisfying
);
criterion_main!(benches);
