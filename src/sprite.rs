//! Sprite rendering - catalog PNG art drawn as half-block cells
//!
//! Each terminal cell carries two vertically stacked pixels: the upper one
//! as the foreground of `▀`, the lower one as the background. Transparent
//! pixels leave the cell (or half of it) unpainted.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pixels with alpha below this are treated as empty.
const ALPHA_VISIBLE: u8 = 8;

/// Decoded RGBA sprite, row-major, four bytes per pixel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode downloaded sprite bytes (PNG for this catalog) into an RGBA grid.
pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteImage, String> {
    let image =
        image::load_from_memory(bytes).map_err(|e| format!("Failed to decode sprite: {}", e))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(SpriteImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

impl SpriteImage {
    /// Largest cell grid that fits `max_cols` x `max_rows` while preserving
    /// pixel aspect (one cell is one pixel wide and two pixels tall). Never
    /// upscales. `None` when nothing fits.
    pub fn fit(&self, max_cols: u16, max_rows: u16) -> Option<(u16, u16)> {
        if max_cols == 0 || max_rows == 0 || self.width == 0 || self.height == 0 {
            return None;
        }
        let max_px_rows = u32::from(max_rows) * 2;
        let cols = u32::from(max_cols)
            .min(max_px_rows * self.width / self.height)
            .min(self.width)
            .max(1);
        let px_rows = (cols * self.height / self.width).max(1);
        let rows = ((px_rows + 1) / 2).min(u32::from(max_rows)).max(1);
        Some((cols as u16, rows as u16))
    }

    /// Render into styled lines scaled to fit the given cell bounds.
    pub fn half_block_text(&self, max_cols: u16, max_rows: u16) -> Option<Text<'static>> {
        let (cols, rows) = self.fit(max_cols, max_rows)?;
        let mut lines = Vec::with_capacity(usize::from(rows));

        for cy in 0..u32::from(rows) {
            let mut spans = Vec::with_capacity(usize::from(cols));
            for cx in 0..u32::from(cols) {
                let src_x = cx * self.width / u32::from(cols);
                let top_y = (cy * 2) * self.height / (u32::from(rows) * 2);
                let bottom_y = (cy * 2 + 1) * self.height / (u32::from(rows) * 2);
                let top = self.visible_pixel(src_x, top_y);
                let bottom = self.visible_pixel(src_x, bottom_y);

                spans.push(match (top, bottom) {
                    (Some(t), Some(b)) => {
                        Span::styled("\u{2580}", Style::default().fg(rgb(t)).bg(rgb(b)))
                    }
                    (Some(t), None) => Span::styled("\u{2580}", Style::default().fg(rgb(t))),
                    (None, Some(b)) => Span::styled("\u{2584}", Style::default().fg(rgb(b))),
                    (None, None) => Span::raw(" "),
                });
            }
            lines.push(Line::from(spans));
        }

        Some(Text::from(lines))
    }

    fn visible_pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let offset = usize::try_from((y * self.width + x) * 4).ok()?;
        let px = self.pixels.get(offset..offset + 4)?;
        if px[3] < ALPHA_VISIBLE {
            return None;
        }
        Some((px[0], px[1], px[2]))
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}
