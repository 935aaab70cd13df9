// Preprocessing benchmark - measure tensor encoding and score ranking
//
// Run with: cargo bench --bench preprocessing_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{ImageBuffer, Rgb, RgbImage};
use visionize_image_classification::{
    LabelTable, RawScores, ResultRanker, ScoringMode, TensorByteOrder, TensorEncoder,
};

fn test_image(size: u32) -> RgbImage {
    ImageBuffer::from_fn(size, size, |x, y| {
        Rgb([
            ((x + y) % 256) as u8,
            ((x * 2) % 256) as u8,
            ((y * 2) % 256) as u8,
        ])
    })
}

/// Benchmark encoding at common classifier input sizes
fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    for size in [128u32, 224, 299] {
        let image = test_image(size);
        for mode in [ScoringMode::Quantized, ScoringMode::Floating] {
            let encoder = TensorEncoder::new(size, mode, TensorByteOrder::Native);
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), format!("{size}x{size}")),
                &image,
                |b, img| {
                    b.iter(|| {
                        let buffer = encoder.encode(black_box(img)).unwrap();
                        black_box(buffer);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark ranking a 1001-class ImageNet output
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    let labels: LabelTable = (0..1001).map(|i| format!("class_{i}")).collect();
    let ranker = ResultRanker::default();

    let quantized = RawScores::Quantized((0..1001).map(|i| (i * 37 % 256) as u8).collect());
    let floating = RawScores::Floating((0..1001).map(|i| (i * 37 % 1000) as f32 / 1000.0).collect());

    group.bench_function("quantized_1001", |b| {
        b.iter(|| black_box(ranker.rank(black_box(&quantized), &labels)));
    });
    group.bench_function("floating_1001", |b| {
        b.iter(|| black_box(ranker.rank(black_box(&floating), &labels)));
    });

    group.finish();
}

criterion_group!(benches, bench_encoding, bench_ranking);
criterion_main!(benches);
