//! Frame layout: places the frame, its panel, decorations, text blocks and
//! image badge inside a viewport.

use crate::compose::{Border, Composition};
use crate::Viewport;
use serde::Serialize;

/// Shown when the resolved quote is empty.
pub const QUOTE_PLACEHOLDER: &str = "Your generated or custom quote will appear here.";
/// Shown in place of quote and caption while generating.
pub const LOADING_TEXT: &str = "Generating your quote...";

/// Height of the band above the frame that holds the upper half of the image badge.
pub const TOP_BAND: u32 = 56;
pub const BADGE_IMAGE: u32 = 96;
const BADGE_RING: u32 = 4;
const BADGE_INNER: u32 = 2;
const MARK_INSET: i32 = 20;
const MARK_WIDTH: u32 = 72;
const MARK_HEIGHT: u32 = 20;
const SPINNER: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Shrink by `d` on every side.
    pub fn inset(&self, d: u32) -> Rect {
        Rect {
            x: self.x + d as i32,
            y: self.y + d as i32,
            width: self.width.saturating_sub(2 * d),
            height: self.height.saturating_sub(2 * d),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn scale(&self, k: u32) -> Rect {
        Rect {
            x: self.x * k as i32,
            y: self.y * k as i32,
            width: self.width * k,
            height: self.height * k,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementType {
    /// Outer frame (border area + shadow caster)
    Frame,
    /// Background panel inside the border
    Panel,
    QuoteMarkOpen,
    QuoteMarkClose,
    Quote,
    Caption,
    /// Spinner plus status line while generating
    Spinner,
    Status,
    ImageBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub rect: Rect,
    pub elem_type: ElementType,
    /// Wrapped text, one line per `\n`; empty for non-text nodes
    pub text: String,
    pub font_size: u32,
}

impl LayoutNode {
    fn boxed(rect: Rect, elem_type: ElementType) -> Self {
        Self { rect, elem_type, text: String::new(), font_size: 0 }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Greedy word wrap by estimated glyph width (half the font size).
pub fn wrap_text(text: &str, max_width: u32, font_size: u32) -> Vec<String> {
    let glyph = (font_size / 2).max(1);
    let chars_per_line = (max_width / glyph).max(1) as usize;
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut cur = String::new();
        for word in paragraph.split_whitespace() {
            let cur_len = cur.chars().count();
            if cur_len + word.chars().count() + 1 > chars_per_line && !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
                cur.push_str(word);
            } else {
                if !cur.is_empty() {
                    cur.push(' ');
                }
                cur.push_str(word);
            }
        }
        if !cur.is_empty() {
            lines.push(cur);
        }
    }
    lines
}

fn line_height(font_size: u32) -> u32 {
    font_size * 8 / 5
}

/// Compute the frame's layout for `composition` in `viewport`.
pub fn layout_frame(composition: &Composition, viewport: Viewport) -> Vec<LayoutNode> {
    let mut nodes = Vec::new();
    let style = &composition.style;

    let frame = Rect::new(0, TOP_BAND as i32, viewport.width, viewport.height.saturating_sub(TOP_BAND));
    nodes.push(LayoutNode::boxed(frame, ElementType::Frame));

    let pad = match composition.layout.border {
        Border::Gradient { width, .. } => width,
        _ => 0,
    };
    let panel = frame.inset(pad);
    nodes.push(LayoutNode::boxed(panel, ElementType::Panel));

    nodes.push(LayoutNode::boxed(
        Rect::new(panel.x + MARK_INSET, panel.y + MARK_INSET, MARK_WIDTH, MARK_HEIGHT),
        ElementType::QuoteMarkOpen,
    ));
    nodes.push(LayoutNode::boxed(
        Rect::new(
            panel.right() - MARK_INSET - MARK_WIDTH as i32,
            panel.bottom() - MARK_INSET - MARK_HEIGHT as i32,
            MARK_WIDTH,
            MARK_HEIGHT,
        ),
        ElementType::QuoteMarkClose,
    ));

    // p-4, then pt-14 pb-6 for the text column
    let content = {
        let c = panel.inset(16);
        Rect::new(c.x, c.y + 56, c.width, c.height.saturating_sub(56 + 24))
    };

    if composition.loading {
        let status_h = line_height(16);
        let block_h = SPINNER + 16 + status_h;
        let top = content.y + (content.height.saturating_sub(block_h) / 2) as i32;
        let cx = content.x + (content.width / 2) as i32;
        nodes.push(LayoutNode::boxed(
            Rect::new(cx - (SPINNER / 2) as i32, top, SPINNER, SPINNER),
            ElementType::Spinner,
        ));
        nodes.push(LayoutNode {
            rect: Rect::new(content.x, top + (SPINNER + 16) as i32, content.width, status_h),
            elem_type: ElementType::Status,
            text: LOADING_TEXT.to_string(),
            font_size: 16,
        });
    } else {
        let caption_h = if composition.caption.is_empty() {
            0
        } else {
            let lines = wrap_text(&composition.caption, content.width, style.caption_font_size).len().max(1) as u32;
            16 + lines * line_height(style.caption_font_size)
        };

        // px-6 around the quote; the quote box takes the remaining height
        let quote_w = content.width.saturating_sub(48);
        let quote = if composition.quote_text.is_empty() {
            QUOTE_PLACEHOLDER
        } else {
            composition.quote_text.as_str()
        };
        let lines = wrap_text(quote, quote_w, style.font_size);
        let quote_area = Rect::new(content.x + 24, content.y, quote_w, content.height.saturating_sub(caption_h));
        let text_h = (lines.len().max(1) as u32 * line_height(style.font_size)).min(quote_area.height);
        nodes.push(LayoutNode {
            rect: Rect::new(
                quote_area.x,
                quote_area.y + (quote_area.height.saturating_sub(text_h) / 2) as i32,
                quote_area.width,
                text_h,
            ),
            elem_type: ElementType::Quote,
            text: lines.join("\n"),
            font_size: style.font_size,
        });

        if caption_h > 0 {
            let lines = wrap_text(&composition.caption, content.width, style.caption_font_size);
            nodes.push(LayoutNode {
                rect: Rect::new(content.x, quote_area.bottom() + 16, content.width, caption_h - 16),
                elem_type: ElementType::Caption,
                text: lines.join("\n"),
                font_size: style.caption_font_size,
            });
        }
    }

    if composition.image.is_some() {
        let outer = BADGE_IMAGE + 2 * (BADGE_RING + BADGE_INNER);
        let x = (viewport.width.saturating_sub(outer) / 2) as i32;
        let y = TOP_BAND as i32 - (outer / 2) as i32;
        nodes.push(LayoutNode::boxed(Rect::new(x, y, outer, outer), ElementType::ImageBadge));
    }

    nodes
}

/// Ring, inner border and image rects of a badge node.
pub fn badge_parts(badge: &Rect) -> (Rect, Rect, Rect) {
    let inner = badge.inset(BADGE_RING);
    let image = inner.inset(BADGE_INNER);
    (*badge, inner, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::session::{Edit, Session};
    use crate::upload::ImageHandle;

    fn find(nodes: &[LayoutNode], t: ElementType) -> Option<&LayoutNode> {
        nodes.iter().find(|n| n.elem_type == t)
    }

    #[test]
    fn empty_quote_uses_placeholder() {
        let nodes = layout_frame(&compose(&Session::new()), Viewport::default());
        let q = find(&nodes, ElementType::Quote).unwrap();
        assert_eq!(q.text.replace('\n', " "), QUOTE_PLACEHOLDER);
        assert!(find(&nodes, ElementType::Caption).is_some());
        assert!(find(&nodes, ElementType::ImageBadge).is_none());
    }

    #[test]
    fn empty_caption_has_no_node() {
        let s = Session::new().apply(Edit::Caption(String::new()));
        let nodes = layout_frame(&compose(&s), Viewport::default());
        assert!(find(&nodes, ElementType::Caption).is_none());
    }

    #[test]
    fn loading_replaces_text_blocks() {
        let (pending, _) = Session::new().begin_generation().unwrap().unwrap();
        let nodes = layout_frame(&compose(&pending), Viewport::default());
        assert!(find(&nodes, ElementType::Quote).is_none());
        assert!(find(&nodes, ElementType::Caption).is_none());
        assert_eq!(find(&nodes, ElementType::Status).unwrap().text, LOADING_TEXT);
    }

    #[test]
    fn badge_straddles_frame_top() {
        let s = Session::new().apply(Edit::Image(Some(ImageHandle::from_bytes(b"x", "image/png"))));
        let v = Viewport::default();
        let nodes = layout_frame(&compose(&s), v);
        let badge = find(&nodes, ElementType::ImageBadge).unwrap().rect;
        assert!(badge.y >= 0);
        assert!(badge.y < TOP_BAND as i32 && badge.bottom() > TOP_BAND as i32);
        assert_eq!(badge.x + badge.width as i32 / 2, v.width as i32 / 2);
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("one two three four five six seven", 80, 16);
        assert!(lines.len() > 1);
        for l in &lines {
            assert!(l.chars().count() <= 10, "line too long: {}", l);
        }
        assert!(wrap_text("", 80, 16).is_empty());
    }
}
