use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quoteframe::{compose, find_preset, Edit, Language, Session, Surface, Viewport};

fn sample_session() -> Session {
    Session::new()
        .apply(Edit::ApplyPreset(find_preset("Ocean Glass").unwrap()))
        .apply(Edit::Language(Language::Urdu))
        .apply(Edit::UseCustomQuote(true))
        .apply(Edit::CustomQuote(
            "The best time to plant a tree was twenty years ago. The second best time is now.".into(),
        ))
}

fn bench_compose(c: &mut Criterion) {
    let session = sample_session();
    c.bench_function("compose", |b| b.iter(|| compose(black_box(&session))));
}

fn bench_capture(c: &mut Criterion) {
    let session = sample_session();
    c.bench_function("surface_capture", |b| {
        b.iter(|| Surface::capture(black_box(&session), Viewport::default()))
    });
}

#[cfg(feature = "raster")]
fn bench_rasterize(c: &mut Criterion) {
    use quoteframe::rendering::raster::{RasterFormat, Rasterizer};
    use quoteframe::SoftwareRasterizer;

    let surface = Surface::capture(&sample_session(), Viewport::default());
    let r = SoftwareRasterizer::with_font_dirs(Vec::new()).unwrap();
    c.bench_function("rasterize_png_1x", |b| {
        b.iter(|| r.rasterize(black_box(&surface), 1, RasterFormat::Png).unwrap())
    });
}

#[cfg(not(feature = "raster"))]
fn bench_rasterize(_c: &mut Criterion) {}

criterion_group!(benches, bench_compose, bench_capture, bench_rasterize);
criterion_main!(benches);
