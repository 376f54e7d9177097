use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    // 20 full stereo frames, about 2.3 seconds at 44.1 kHz.
    let bytes = qoadec::test_helper::busy_stream(2, 20, 256);

    c.bench_function("decode_stereo_20_frames", |b| {
        b.iter(|| {
            let Ok(decoded) = qoadec::decode_bytes(black_box(&bytes)) else {
                panic!("decode_bytes failed");
            };
            assert_eq!(decoded.samples.len(), 20 * 5120 * 2);
            black_box(decoded.samples.len());
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
