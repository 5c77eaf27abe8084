//! Display list: the paint commands a rasterizer consumes, in paint order.

use crate::compose::{Border, Composition, Direction, FontFace, ImageRing, ACCENT};
use crate::rendering::layout::{badge_parts, ElementType, LayoutNode, Rect};
use crate::style::Color;
use crate::upload::ImageHandle;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PaintCommand {
    Shadow {
        rect: Rect,
        radius: u32,
        offset_y: u32,
        blur: u32,
        color: Color,
    },
    Fill {
        rect: Rect,
        radius: u32,
        color: Color,
    },
    /// Vertical gradient, `from` at the top
    Gradient {
        rect: Rect,
        radius: u32,
        from: Color,
        to: Color,
    },
    /// Outline of `width` px drawn inside `rect`
    Stroke {
        rect: Rect,
        radius: u32,
        width: u32,
        color: Color,
    },
    /// Centred lines of text
    Text {
        rect: Rect,
        text: String,
        font: FontFace,
        size: u32,
        color: Color,
        direction: Direction,
    },
    Image {
        rect: Rect,
        radius: u32,
        source: ImageHandle,
    },
}

/// Turn a layout into paint commands using the composition's treatments.
pub fn build_display_list(composition: &Composition, nodes: &[LayoutNode]) -> Vec<PaintCommand> {
    let layout = &composition.layout;
    let style = &composition.style;
    let radius = layout.corner_radius;
    let mut cmds = Vec::new();

    for node in nodes {
        let rect = node.rect;
        match node.elem_type {
            ElementType::Frame => {
                cmds.push(PaintCommand::Shadow {
                    rect,
                    radius,
                    offset_y: layout.shadow.offset_y,
                    blur: layout.shadow.blur,
                    color: layout.shadow.color,
                });
                if let Border::Gradient { from, to, .. } = layout.border {
                    cmds.push(PaintCommand::Gradient { rect, radius, from, to });
                }
            }
            ElementType::Panel => {
                let inner_radius = match layout.border {
                    Border::Gradient { width, .. } => radius.saturating_sub(width),
                    _ => radius,
                };
                cmds.push(PaintCommand::Fill { rect, radius: inner_radius, color: layout.background.color() });
                match layout.border {
                    Border::Hairline { color, width } => {
                        cmds.push(PaintCommand::Stroke { rect, radius: inner_radius, width, color });
                    }
                    Border::Inset { color, width, inset } => {
                        cmds.push(PaintCommand::Stroke { rect: rect.inset(inset), radius: 2, width, color });
                    }
                    Border::None | Border::Gradient { .. } => {}
                }
            }
            ElementType::QuoteMarkOpen | ElementType::QuoteMarkClose => {
                // 24x20 glyph, 8 px gap, 40x5 bar; mirrored for the closing mark
                let open = node.elem_type == ElementType::QuoteMarkOpen;
                let glyph_x = if open { rect.x } else { rect.right() - 24 };
                let bar_x = if open { rect.x + 32 } else { rect.x };
                let bar_y = rect.y + (rect.height as i32 - 5) / 2;
                cmds.push(PaintCommand::Fill { rect: Rect::new(glyph_x, rect.y, 24, 20), radius: 8, color: ACCENT });
                cmds.push(PaintCommand::Fill { rect: Rect::new(bar_x, bar_y, 40, 5), radius: 2, color: ACCENT });
            }
            ElementType::Quote => cmds.push(PaintCommand::Text {
                rect,
                text: node.text.clone(),
                font: composition.fonts.quote,
                size: node.font_size,
                color: style.text_color,
                direction: composition.direction,
            }),
            ElementType::Caption => cmds.push(PaintCommand::Text {
                rect,
                text: node.text.clone(),
                font: composition.fonts.caption,
                size: node.font_size,
                color: style.text_color.with_opacity(0.9),
                direction: Direction::Ltr,
            }),
            ElementType::Spinner => {
                cmds.push(PaintCommand::Stroke {
                    rect,
                    radius: rect.width / 2,
                    width: 4,
                    color: style.text_color.with_opacity(0.25),
                });
            }
            ElementType::Status => cmds.push(PaintCommand::Text {
                rect,
                text: node.text.clone(),
                font: composition.fonts.caption,
                size: node.font_size,
                color: style.text_color.with_opacity(0.8),
                direction: Direction::Ltr,
            }),
            ElementType::ImageBadge => {
                let Some(source) = composition.image.clone() else {
                    continue;
                };
                let (ring, inner, image) = badge_parts(&rect);
                cmds.push(PaintCommand::Shadow { rect: ring, radius: 12, offset_y: 4, blur: 8, color: Color::BLACK.with_opacity(0.2) });
                match layout.image_ring {
                    ImageRing::Gradient { from, to } => {
                        cmds.push(PaintCommand::Gradient { rect: ring, radius: 12, from, to });
                    }
                    ImageRing::Translucent { color } | ImageRing::Accent { color } => {
                        cmds.push(PaintCommand::Fill { rect: ring, radius: 12, color });
                    }
                }
                cmds.push(PaintCommand::Fill { rect: inner, radius: 8, color: style.background_color });
                cmds.push(PaintCommand::Image { rect: image, radius: 6, source });
            }
        }
    }

    cmds
}
