use blobmatch::{
    BlobCounter, ImageStatistics, MatchConfig, PixelBuffer, PixelFormat, PixelView, Rect,
    TemplateMatcher,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn make_blobs(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            // Disc grid with a 24-pixel pitch.
            let dx = (x % 24) as i64 - 12;
            let dy = (y % 24) as i64 - 12;
            if dx * dx + dy * dy < 64 {
                data[y * width + x] = 200;
            }
        }
    }
    data
}

fn bench_labeling(c: &mut Criterion) {
    let width = 1024;
    let height = 768;
    let data = make_blobs(width, height);
    let view = PixelView::from_slice(&data, width, height, PixelFormat::Gray8).unwrap();

    c.bench_function("blob_counter_two_pass", |b| {
        let mut counter = BlobCounter::new();
        b.iter(|| black_box(counter.process_image(view).unwrap()));
    });

    let noisy = make_image(width, height);
    let noisy_view = PixelView::from_slice(&noisy, width, height, PixelFormat::Gray8).unwrap();
    c.bench_function("blob_counter_two_pass_noise", |b| {
        let mut counter = BlobCounter::new();
        b.iter(|| black_box(counter.process_image(noisy_view).unwrap()));
    });
}

fn bench_matcher(c: &mut Criterion) {
    let width = 256;
    let height = 192;
    let image = make_image(width, height);
    let image_view = PixelView::from_slice(&image, width, height, PixelFormat::Gray8).unwrap();
    let template = PixelBuffer::from_view(image_view.roi(Rect::new(100, 80, 24, 24)).unwrap());

    let matcher = TemplateMatcher::new().with_config(MatchConfig {
        similarity_threshold: 0.8,
        ..MatchConfig::default()
    });
    c.bench_function("template_match_gray", |b| {
        b.iter(|| black_box(matcher.process_image(image_view, template.view()).unwrap()));
    });

    if cfg!(feature = "rayon") {
        let matcher_par = TemplateMatcher::new().with_config(MatchConfig {
            similarity_threshold: 0.8,
            parallel: true,
            ..MatchConfig::default()
        });
        c.bench_function("template_match_gray_parallel", |b| {
            b.iter(|| black_box(matcher_par.process_image(image_view, template.view()).unwrap()));
        });
    }
}

fn bench_statistics(c: &mut Criterion) {
    let width = 1024;
    let height = 768;
    let data = make_image(width * 3, height);
    let view = PixelView::from_slice(&data, width, height, PixelFormat::Rgb24).unwrap();

    c.bench_function("image_statistics_rgb", |b| {
        b.iter(|| black_box(ImageStatistics::compute(view).unwrap()));
    });
}

criterion_group!(benches, bench_labeling, bench_matcher, bench_statistics);
criterion_main!(benches);
