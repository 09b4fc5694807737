//! Frame render benchmarks: landscape vs portrait, fixed vs sampled color.
//! Run: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ascii_filter::ascii::{sample_cell_colors_with, AsciiRenderer, SamplingStrategy};
use ascii_filter::config::{ColorMode, FilterConfig};
use ascii_filter::frame::{Frame, PixelFormat};

/// Smooth gradients with a bright disc, so both passes have work to do.
fn synthetic_frame(width: u32, height: u32) -> Frame {
    let (cx, cy) = (width as i64 / 2, height as i64 / 2);
    let r2 = (width.min(height) as i64 / 3).pow(2);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            if dx * dx + dy * dy < r2 {
                data.extend_from_slice(&[240, 220, 200]);
            } else {
                data.extend_from_slice(&[(x * 255 / width) as u8, (y * 255 / height) as u8, 90]);
            }
        }
    }
    Frame::from_raw(data, width, height, PixelFormat::Rgb).expect("frame size")
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    group.sample_size(50);

    for (width, height) in [(640, 480), (480, 640)] {
        let frame = synthetic_frame(width, height);
        for (label, mode) in [
            ("fixed", ColorMode::default()),
            ("sampled", ColorMode::SampleOriginal),
        ] {
            let renderer = AsciiRenderer::new(FilterConfig::default().with_color_mode(mode))
                .expect("create renderer");
            group.bench_function(format!("{}x{}_{}", width, height, label), |b| {
                b.iter(|| black_box(renderer.render(black_box(&frame))));
            });
        }
    }

    group.finish();
}

fn bench_color_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_colors");
    let frame = synthetic_frame(480, 640);

    for (label, strategy) in [
        ("area_resize", SamplingStrategy::AreaResize),
        ("integral_image", SamplingStrategy::IntegralImage),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| black_box(sample_cell_colors_with(black_box(&frame), strategy)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_color_sampling);
criterion_main!(benches);
