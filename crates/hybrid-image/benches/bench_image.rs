use criterion::{criterion_group, criterion_main, Criterion};
use hybrid_image::{ops, Image};
use std::hint::black_box;

fn sample_image() -> Image<u8> {
    Image::from_shape_val(&[1080, 1920, 3], 127)
}

fn bench_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("Image");

    group.bench_function("normalize_to_f32", |b| {
        let image = sample_image();
        let mut dst = Image::from_shape_val(image.shape(), 0.0f32);
        b.iter(|| ops::normalize_to_f32(black_box(&image), &mut dst))
    });

    group.bench_function("quantize_to_u8", |b| {
        let image = Image::from_shape_val(&[1080, 1920, 3], 0.5f32);
        let mut dst = Image::from_shape_val(image.shape(), 0u8);
        b.iter(|| ops::quantize_to_u8(black_box(&image), &mut dst, 255.0))
    });

    group.bench_function("cast_and_scale_f32", |b| {
        b.iter_batched(
            sample_image,
            |image| black_box(image).cast_and_scale(1.0f32 / 255.0f32),
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_image);
criterion_main!(benches);
