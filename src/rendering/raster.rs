//! Rasterization: display list in, encoded image bytes out.

use crate::rendering::Surface;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    /// Lossy, `quality` in 1..=100
    Jpeg { quality: u8 },
}

impl RasterFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Rasterization knobs taken from [`crate::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Device pixels per layout pixel
    pub pixel_ratio: u32,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { pixel_ratio: 2, jpeg_quality: 95 }
    }
}

impl From<&crate::Config> for RasterOptions {
    fn from(cfg: &crate::Config) -> Self {
        Self { pixel_ratio: cfg.pixel_ratio, jpeg_quality: cfg.jpeg_quality }
    }
}

/// Encodes a captured surface. Implementations may fail for any reason
/// (e.g. undecodable image content); callers normalize the error.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, surface: &Surface, pixel_ratio: u32, format: RasterFormat) -> Result<Vec<u8>>;
}

#[cfg(feature = "raster")]
pub use software::SoftwareRasterizer;

#[cfg(feature = "raster")]
mod software {
    use super::{RasterFormat, Rasterizer};
    use crate::rendering::layout::Rect;
    use crate::rendering::paint::PaintCommand;
    use crate::rendering::text::{FontBook, PlacedGlyph};
    use crate::rendering::Surface;
    use crate::style::Color;
    use crate::upload::ImageHandle;
    use crate::{Error, Result};
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::imageops::FilterType;
    use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Pure-Rust rasterizer over the `image` crate.
    ///
    /// Paints geometry, gradients, shadows, the uploaded image and text runs.
    /// Text uses the installed font for each family when one is found and
    /// the bundled DejaVu Sans otherwise. Complex-script shaping (joined
    /// Nastaliq forms) is not performed.
    #[derive(Debug, Clone)]
    pub struct SoftwareRasterizer {
        fonts: Arc<FontBook>,
    }

    impl SoftwareRasterizer {
        /// Rasterizer that looks up fonts in the platform font directories.
        pub fn new() -> Result<Self> {
            Ok(Self { fonts: Arc::new(FontBook::new()?) })
        }

        /// Rasterizer restricted to `font_dirs`; an empty list renders all
        /// text with the bundled font.
        pub fn with_font_dirs(font_dirs: Vec<PathBuf>) -> Result<Self> {
            Ok(Self { fonts: Arc::new(FontBook::with_search_paths(font_dirs)?) })
        }
    }

    impl Rasterizer for SoftwareRasterizer {
        fn rasterize(&self, surface: &Surface, pixel_ratio: u32, format: RasterFormat) -> Result<Vec<u8>> {
            let k = pixel_ratio.max(1);
            let (w, h) = (surface.viewport.width * k, surface.viewport.height * k);
            if w == 0 || h == 0 {
                return Err(Error::RenderError("surface has zero size".into()));
            }
            let mut canvas = Canvas { img: RgbaImage::new(w, h), fonts: &self.fonts };
            for cmd in &surface.display_list {
                canvas.paint(cmd, k)?;
            }
            log::debug!("rasterized {}x{} ({} commands)", w, h, surface.display_list.len());
            encode(canvas.img, format)
        }
    }

    struct Canvas<'a> {
        img: RgbaImage,
        fonts: &'a FontBook,
    }

    /// Whether (px, py) lies inside `r` with corners rounded by `radius`.
    fn inside_rounded(r: &Rect, radius: u32, px: i32, py: i32) -> bool {
        if px < r.x || py < r.y || px >= r.right() || py >= r.bottom() {
            return false;
        }
        let rad = radius.min(r.width / 2).min(r.height / 2) as i32;
        if rad == 0 {
            return true;
        }
        // Corner centres; for a full pill (rad == half the side) they meet.
        let cx = px.clamp(r.x + rad, (r.right() - rad - 1).max(r.x + rad));
        let cy = py.clamp(r.y + rad, (r.bottom() - rad - 1).max(r.y + rad));
        let (dx, dy) = ((px - cx) as i64, (py - cy) as i64);
        dx * dx + dy * dy <= (rad as i64) * (rad as i64)
    }

    fn blend(dst: &mut Rgba<u8>, src: Color) {
        let sa = src.a as u32;
        if sa == 0 {
            return;
        }
        let da = dst[3] as u32;
        let out_a = sa + da * (255 - sa) / 255;
        if out_a == 0 {
            return;
        }
        let mix = |s: u8, d: u8| -> u8 {
            ((s as u32 * sa + d as u32 * da * (255 - sa) / 255) / out_a) as u8
        };
        *dst = Rgba([mix(src.r, dst[0]), mix(src.g, dst[1]), mix(src.b, dst[2]), out_a as u8]);
    }

    fn lerp(a: u8, b: u8, t: f32) -> u8 {
        (a as f32 + (b as f32 - a as f32) * t).round() as u8
    }

    impl Canvas<'_> {
        fn for_each_in(&mut self, r: &Rect, radius: u32, mut f: impl FnMut(i32, i32, &mut Rgba<u8>)) {
            let (w, h) = (self.img.width() as i32, self.img.height() as i32);
            for py in r.y.max(0)..r.bottom().min(h) {
                for px in r.x.max(0)..r.right().min(w) {
                    if inside_rounded(r, radius, px, py) {
                        f(px, py, self.img.get_pixel_mut(px as u32, py as u32));
                    }
                }
            }
        }

        fn paint(&mut self, cmd: &PaintCommand, k: u32) -> Result<()> {
            match cmd {
                PaintCommand::Fill { rect, radius, color } => {
                    let c = *color;
                    self.for_each_in(&rect.scale(k), radius * k, |_, _, p| blend(p, c));
                }
                PaintCommand::Gradient { rect, radius, from, to } => {
                    let r = rect.scale(k);
                    let (from, to) = (*from, *to);
                    let span = r.height.max(1) as f32;
                    self.for_each_in(&r, radius * k, |_, py, p| {
                        let t = (py - r.y) as f32 / span;
                        let c = Color::rgba(
                            lerp(from.r, to.r, t),
                            lerp(from.g, to.g, t),
                            lerp(from.b, to.b, t),
                            lerp(from.a, to.a, t),
                        );
                        blend(p, c);
                    });
                }
                PaintCommand::Stroke { rect, radius, width, color } => {
                    let outer = rect.scale(k);
                    let inner = outer.inset(width * k);
                    let inner_radius = (radius * k).saturating_sub(width * k);
                    let c = *color;
                    self.for_each_in(&outer, radius * k, |px, py, p| {
                        if !inside_rounded(&inner, inner_radius, px, py) {
                            blend(p, c);
                        }
                    });
                }
                PaintCommand::Shadow { rect, radius, offset_y, blur, color } => {
                    // Stacked expanding layers approximate a blurred shadow.
                    const LAYERS: u32 = 4;
                    let base = rect.scale(k);
                    let layer = color.with_opacity(1.0 / LAYERS as f32);
                    for i in 0..LAYERS {
                        let grow = (blur * k * (LAYERS - i) / LAYERS / 2) as i32;
                        let r = Rect::new(
                            base.x - grow,
                            base.y - grow + (offset_y * k) as i32,
                            base.width + 2 * grow as u32,
                            base.height + 2 * grow as u32,
                        );
                        self.for_each_in(&r, radius * k + grow as u32, |_, _, p| blend(p, layer));
                    }
                }
                PaintCommand::Image { rect, radius, source } => self.draw_image(&rect.scale(k), radius * k, source)?,
                PaintCommand::Text { rect, text, font, size, color, direction } => {
                    let c = *color;
                    for g in self.fonts.layout(text, *font, size * k, *direction, &rect.scale(k)) {
                        self.blit_coverage(&g, c);
                    }
                }
            }
            Ok(())
        }

        fn blit_coverage(&mut self, g: &PlacedGlyph, color: Color) {
            let (w, h) = (self.img.width() as i32, self.img.height() as i32);
            for row in 0..g.height {
                let py = g.y + row as i32;
                if py < 0 || py >= h {
                    continue;
                }
                for col in 0..g.width {
                    let px = g.x + col as i32;
                    let cov = g.coverage[row * g.width + col];
                    if px < 0 || px >= w || cov == 0 {
                        continue;
                    }
                    let p = self.img.get_pixel_mut(px as u32, py as u32);
                    blend(p, color.with_opacity(cov as f32 / 255.0));
                }
            }
        }

        fn draw_image(&mut self, r: &Rect, radius: u32, source: &ImageHandle) -> Result<()> {
            let bytes = source.decode_bytes()?;
            let decoded = image::load_from_memory(&bytes)
                .map_err(|e| Error::RenderError(format!("cannot decode uploaded image: {}", e)))?;
            let fitted = decoded.resize_to_fill(r.width.max(1), r.height.max(1), FilterType::Triangle).to_rgba8();
            let (ox, oy) = (r.x, r.y);
            self.for_each_in(r, radius, |px, py, p| {
                let s = fitted.get_pixel((px - ox) as u32, (py - oy) as u32);
                blend(p, Color::rgba(s[0], s[1], s[2], s[3]));
            });
            Ok(())
        }
    }

    fn encode(img: RgbaImage, format: RasterFormat) -> Result<Vec<u8>> {
        let (w, h) = img.dimensions();
        let mut out = Vec::new();
        let res = match format {
            RasterFormat::Png => PngEncoder::new(&mut out).write_image(img.as_raw(), w, h, ExtendedColorType::Rgba8),
            RasterFormat::Jpeg { quality } => {
                // JPEG has no alpha: flatten onto white.
                let mut rgb = Vec::with_capacity((w * h * 3) as usize);
                for p in img.pixels() {
                    let mut bg = Rgba([255, 255, 255, 255]);
                    blend(&mut bg, Color::rgba(p[0], p[1], p[2], p[3]));
                    rgb.extend_from_slice(&bg.0[..3]);
                }
                JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                    .write_image(&rgb, w, h, ExtendedColorType::Rgb8)
            }
        };
        res.map_err(|e| Error::RenderError(format!("encoding failed: {}", e)))?;
        Ok(out)
    }

}
