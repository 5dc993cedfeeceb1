use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use sphinx_inventory::{parse, record};
use std::io::{Cursor, Write};

fn sample_inventory(objects: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..objects {
        body.push_str(&format!("object {i} std:label -1 page-{}.html#$ -\n", i % 50));
    }
    let mut out = b"# Sphinx inventory version 2\n# Project: bench\n# Version: 1.0\n# zlib\n".to_vec();
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(body.as_bytes()).unwrap();
    out.extend(enc.finish().unwrap());
    out
}

fn bench_parse(c: &mut Criterion) {
    let data = sample_inventory(10_000);
    c.bench_function("parse_10k_objects", |b| {
        b.iter(|| parse(Cursor::new(black_box(&data[..])), "https://example.org/").unwrap())
    });
}

fn bench_record_line(c: &mut Criterion) {
    c.bench_function("parse_record_line", |b| {
        b.iter(|| record::parse_line(black_box("white space std:label 1 white-space -"), "").unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_record_line);
criterion_main!(benches);
