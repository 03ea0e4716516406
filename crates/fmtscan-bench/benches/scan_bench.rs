//! Scanner benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fmtscan_core::{Dest, scan};

fn bench_integer_radixes(c: &mut Criterion) {
    let cases: &[(&str, &[u8], &[u8])] = &[
        ("decimal", b"%d", b"-1234567890"),
        ("octal", b"%o", b"01234567"),
        ("hex", b"%x", b"0xDEADBEEF"),
        ("auto", b"%i", b"0x7fffffff"),
    ];
    let mut group = c.benchmark_group("integer_radixes");

    for &(label, format, input) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(label), &(), |b, ()| {
            b.iter(|| {
                let mut value = 0i64;
                let mut slots = [Dest::I64(&mut value)];
                let count = scan(input, format, &mut slots);
                criterion::black_box((count, value));
            });
        });
    }
    group.finish();
}

fn bench_token_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_length");

    for &len in &[8usize, 64, 512, 4096] {
        let input = vec![b'a'; len];
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| {
                let mut token = Vec::new();
                let mut slots = [Dest::Token(&mut token)];
                let count = scan(input, b"%s", &mut slots);
                criterion::black_box((count, token));
            });
        });
    }
    group.finish();
}

fn bench_class_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("class_scan");
    let input = b"abcxyzabcxyzabcxyzabcxyzabcxyz0123";

    group.bench_function("positive_range", |b| {
        b.iter(|| {
            let mut token = Vec::new();
            let mut slots = [Dest::Token(&mut token)];
            let count = scan(input, b"%[a-z]", &mut slots);
            criterion::black_box((count, token));
        });
    });

    group.bench_function("negated_range", |b| {
        b.iter(|| {
            let mut token = Vec::new();
            let mut slots = [Dest::Token(&mut token)];
            let count = scan(input, b"%[^0-9]", &mut slots);
            criterion::black_box((count, token));
        });
    });

    group.finish();
}

fn bench_mixed_format(c: &mut Criterion) {
    let input = b"-1234 label 4321 X789 word 18";
    let format = b"%i%s %u %c%d %*s%n";

    c.bench_function("mixed_format", |b| {
        b.iter(|| {
            let mut a = 0i64;
            let mut token = Vec::new();
            let mut u = 0u64;
            let mut ch = [0u8; 1];
            let mut d = 0i64;
            let mut pos = 0usize;
            let mut slots = [
                Dest::I64(&mut a),
                Dest::Token(&mut token),
                Dest::U64(&mut u),
                Dest::Bytes(&mut ch),
                Dest::I64(&mut d),
                Dest::Pos(&mut pos),
            ];
            let count = scan(input, format, &mut slots);
            criterion::black_box((count, pos));
        });
    });
}

fn bench_float_scan(c: &mut Criterion) {
    let cases: &[(&str, &[u8])] = &[
        ("plain", b"-12.345"),
        ("exponent", b"5.24e3"),
        ("fraction_only", b".1234"),
    ];
    let mut group = c.benchmark_group("float_scan");

    for &(label, input) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(label), &(), |b, ()| {
            b.iter(|| {
                let mut value = 0f64;
                let mut slots = [Dest::F64(&mut value)];
                let count = scan(input, b"%lf", &mut slots);
                criterion::black_box((count, value));
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_integer_radixes,
    bench_token_length,
    bench_class_scan,
    bench_mixed_format,
    bench_float_scan
);
criterion_main!(benches);
