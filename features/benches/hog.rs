//! Benchmarks for HOG descriptor extraction.
//!
//! Separates the per-image cell pass (`process`) from the per-window block
//! pass (`retrieve`).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hog_core::Rect;
use hog_features::{Hog, HogConfig};
use image::{GrayImage, Luma};

/// Synthetic striped pattern with gradients everywhere.
fn create_test_image(width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let pattern = ((x / 10) % 2) * 200 + ((y / 6) % 2) * 40;
            img.put_pixel(x, y, Luma([pattern as u8]));
        }
    }
    img
}

fn benchmark_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("hog_process");

    for size in [128u32, 256, 512] {
        let img = create_test_image(size, size);
        let config = HogConfig::new(16);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &img,
            |b, img| {
                let mut hog = Hog::new(config.clone()).unwrap();
                b.iter(|| {
                    hog.process(black_box(img)).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_retrieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("hog_retrieve");

    for size in [128u32, 256, 512] {
        let img = create_test_image(size, size);
        let mut hog = Hog::new(HogConfig::new(16)).unwrap();
        hog.process(&img).unwrap();
        let window = Rect::new(0, 0, size as usize, size as usize);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &window,
            |b, window| {
                b.iter(|| {
                    let descriptor = hog.retrieve(black_box(window)).unwrap();
                    black_box(descriptor);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_process, benchmark_retrieve);
criterion_main!(benches);
