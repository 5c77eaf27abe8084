//! Glyph rasterization for text runs.
//!
//! Fonts are resolved per family from the platform font directories and fall
//! back glyph by glyph to the bundled DejaVu Sans, so every run renders even
//! on a machine with no fonts installed.

use crate::compose::{Direction, FontFace};
use crate::rendering::layout::Rect;
use crate::{Error, Result};
use fontdue::{Font, FontSettings};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use unicode_bidi::{BidiInfo, Level};

static FALLBACK_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// One placed glyph: coverage bitmap plus its top-left corner in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// Family-keyed font cache with a bundled fallback.
pub struct FontBook {
    search_paths: Vec<PathBuf>,
    fallback: Arc<Font>,
    families: Mutex<HashMap<&'static str, Option<Arc<Font>>>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook").field("search_paths", &self.search_paths).finish()
    }
}

impl FontBook {
    /// Font book over the platform's default font directories.
    pub fn new() -> Result<Self> {
        Self::with_search_paths(default_search_paths())
    }

    /// Font book that only looks in `search_paths`. An empty list renders
    /// every run with the bundled font.
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Result<Self> {
        let fallback = Font::from_bytes(FALLBACK_FONT, FontSettings::default())
            .map_err(|e| Error::RenderError(format!("bundled font is unreadable: {}", e)))?;
        Ok(Self {
            search_paths,
            fallback: Arc::new(fallback),
            families: Mutex::new(HashMap::new()),
        })
    }

    fn family(&self, family: &'static str) -> Option<Arc<Font>> {
        let mut families = match self.families.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        families
            .entry(family)
            .or_insert_with(|| {
                let found = find_family_file(&self.search_paths, family).and_then(|path| {
                    let data = std::fs::read(&path).ok()?;
                    match Font::from_bytes(data, FontSettings::default()) {
                        Ok(font) => {
                            log::debug!("font {:?} -> {}", family, path.display());
                            Some(Arc::new(font))
                        }
                        Err(e) => {
                            log::warn!("Failed to load font {}: {}", path.display(), e);
                            None
                        }
                    }
                });
                if found.is_none() {
                    log::debug!("font {:?} not installed, using bundled fallback", family);
                }
                found
            })
            .clone()
    }

    /// Lay out `text` (one line per `\n`) centred in `rect` at `size` px and
    /// return the glyph bitmaps. RTL lines are reordered for display.
    pub fn layout(&self, text: &str, face: FontFace, size: u32, direction: Direction, rect: &Rect) -> Vec<PlacedGlyph> {
        let primary = self.family(face.family);
        let chain: Vec<&Font> = primary.iter().map(|f| f.as_ref()).chain([self.fallback.as_ref()]).collect();
        let px = size.max(1) as f32;
        let line_height = (size * 8 / 5) as i32;
        let ascent = chain[0]
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px * 0.8);
        // Centre the glyph box inside each line slot.
        let lead = ((line_height as f32 - px) / 2.0).max(0.0);

        let mut glyphs = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let visual = visual_order(line, direction);
            let picks: Vec<(char, &Font)> = visual
                .chars()
                .map(|ch| {
                    let font = chain
                        .iter()
                        .copied()
                        .find(|f| f.lookup_glyph_index(ch) != 0)
                        .unwrap_or(chain[chain.len() - 1]);
                    (ch, font)
                })
                .collect();

            let width: f32 = picks.iter().map(|(ch, f)| f.metrics(*ch, px).advance_width).sum();
            let mut pen = rect.x as f32 + (rect.width as f32 - width) / 2.0;
            let baseline = rect.y + i as i32 * line_height + (lead + ascent).round() as i32;

            for (ch, font) in picks {
                let (m, coverage) = font.rasterize(ch, px);
                if m.width > 0 && m.height > 0 {
                    glyphs.push(PlacedGlyph {
                        x: pen.round() as i32 + m.xmin,
                        y: baseline - m.height as i32 - m.ymin,
                        width: m.width,
                        height: m.height,
                        coverage,
                    });
                }
                pen += m.advance_width;
            }
        }
        glyphs
    }
}

fn visual_order(line: &str, direction: Direction) -> String {
    if direction == Direction::Ltr || line.is_empty() {
        return line.to_string();
    }
    let info = BidiInfo::new(line, Some(Level::rtl()));
    info.paragraphs
        .iter()
        .map(|para| info.reorder_line(para, para.range.clone()).into_owned())
        .collect()
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_font_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("ttf") | Some("otf")
    )
}

/// Regular-weight file for `family`, searching directories recursively.
/// `PlayfairDisplay-Regular.ttf` and `Playfair Display.ttf` both match
/// "Playfair Display"; a bold or italic cut is used only when nothing else is.
fn find_family_file(search_paths: &[PathBuf], family: &str) -> Option<PathBuf> {
    let key = normalize(family);
    let mut best: Option<(usize, PathBuf)> = None;
    let mut stack: Vec<PathBuf> = search_paths.to_vec();
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if !is_font_file(&path) {
                continue;
            }
            let stem = path.file_stem().map(|s| normalize(&s.to_string_lossy())).unwrap_or_default();
            let Some(rest) = stem.strip_prefix(&key) else {
                continue;
            };
            let rank = match rest {
                "" | "regular" => 0,
                r if r.starts_with("variablefont") => 1,
                _ => 2 + rest.len(),
            };
            if best.as_ref().map_or(true, |(r, _)| rank < *r) {
                best = Some((rank, path));
            }
        }
    }
    best.map(|(_, p)| p)
}

fn default_search_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = if cfg!(target_os = "macos") {
        vec!["/System/Library/Fonts".into(), "/Library/Fonts".into()]
    } else if cfg!(target_os = "windows") {
        vec!["C:\\Windows\\Fonts".into()]
    } else {
        vec!["/usr/share/fonts".into(), "/usr/local/share/fonts".into()]
    };
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        paths.push(home.join(".fonts"));
        paths.push(home.join(".local/share/fonts"));
        paths.push(home.join("Library/Fonts"));
    }
    paths
}
