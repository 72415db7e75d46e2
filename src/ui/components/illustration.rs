//! Left-hand panel: the Performance Advisor screenshot for the current
//! illustration, or the synthetic dashboard when the image is unavailable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{imageops::FilterType, RgbaImage};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use super::dashboard::Dashboard;
use super::theme::PANEL_BORDER;
use crate::script::Illustration;

/// Where illustration images live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllustrationSource {
    /// Image for [`Illustration::Overview`]
    pub pa_image: PathBuf,
    /// Directory holding the other variants
    pub assets_dir: PathBuf,
}

impl IllustrationSource {
    pub fn new(pa_image: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            pa_image: pa_image.into(),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn path_for(&self, illustration: Illustration) -> PathBuf {
        match illustration {
            Illustration::Overview => self.pa_image.clone(),
            other => self.assets_dir.join(other.asset_name()),
        }
    }
}

impl Default for IllustrationSource {
    fn default() -> Self {
        Self::new("assets/pa_example.png", "assets")
    }
}

/// Scaled image ready to blit, keyed by the cell size it was built for
struct Scaled {
    cells: (u16, u16),
    image: RgbaImage,
}

pub struct IllustrationPanel {
    source: IllustrationSource,
    current: Illustration,
    /// Decoded images; `None` records a failed load so it is not retried
    images: HashMap<Illustration, Option<RgbaImage>>,
    scaled: Option<(Illustration, Scaled)>,
    dashboard: Dashboard,
}

impl IllustrationPanel {
    pub fn new(source: IllustrationSource, dashboard: Dashboard) -> Self {
        Self {
            source,
            current: Illustration::Overview,
            images: HashMap::new(),
            scaled: None,
            dashboard,
        }
    }

    pub fn current(&self) -> Illustration {
        self.current
    }

    pub fn set(&mut self, illustration: Illustration) {
        if self.current != illustration {
            tracing::debug!(?illustration, "Switching illustration");
            self.current = illustration;
            self.scaled = None;
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    /// Whether the current illustration resolves to a loadable image
    pub fn has_image(&mut self) -> bool {
        self.image(self.current).is_some()
    }

    fn image(&mut self, illustration: Illustration) -> Option<&RgbaImage> {
        let source = &self.source;
        self.images
            .entry(illustration)
            .or_insert_with(|| load_image(&source.path_for(illustration)))
            .as_ref()
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PANEL_BORDER))
            .title(format!(" {} ", self.current.caption()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let current = self.current;
        let cells = (inner.width, inner.height);
        let cached = matches!(&self.scaled, Some((ill, s)) if *ill == current && s.cells == cells);
        if !cached {
            let scaled = self
                .image(current)
                .map(|image| fit_to_cells(image, inner.width, inner.height));
            self.scaled = scaled.map(|image| (current, Scaled { cells, image }));
        }

        match &self.scaled {
            Some((_, scaled)) => draw_half_blocks(&scaled.image, inner, buf),
            None => self.dashboard.render(inner, buf),
        }
    }
}

fn load_image(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(image) => {
            tracing::info!(path = %path.display(), "Loaded illustration");
            Some(image.to_rgba8())
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Illustration unavailable, drawing dashboard instead"
            );
            None
        }
    }
}

/// Scale `image` to fit `width` x `height` cells, two pixel rows per cell,
/// keeping its aspect ratio
fn fit_to_cells(image: &RgbaImage, width: u16, height: u16) -> RgbaImage {
    let (iw, ih) = image.dimensions();
    let max_w = width as f64;
    let max_h = height as f64 * 2.0;
    let scale = (max_w / iw.max(1) as f64).min(max_h / ih.max(1) as f64);
    let target_w = ((iw as f64 * scale).round() as u32).max(1);
    let target_h = ((ih as f64 * scale).round() as u32).max(1);
    image::imageops::resize(image, target_w, target_h, FilterType::Triangle)
}

/// Draw with "▀": foreground is the upper pixel, background the lower one
fn draw_half_blocks(image: &RgbaImage, area: Rect, buf: &mut Buffer) {
    let (iw, ih) = image.dimensions();
    let x_offset = (area.width as u32).saturating_sub(iw) / 2;
    let rows = ih.div_ceil(2);
    let y_offset = (area.height as u32).saturating_sub(rows) / 2;

    for row in 0..rows.min(area.height as u32) {
        for col in 0..iw.min(area.width as u32) {
            let top = pixel_color(image, col, row * 2);
            let bottom = if row * 2 + 1 < ih {
                pixel_color(image, col, row * 2 + 1)
            } else {
                Color::Reset
            };
            let x = area.x + (col + x_offset) as u16;
            let y = area.y + (row + y_offset) as u16;
            buf[(x, y)].set_symbol("▀").set_fg(top).set_bg(bottom);
        }
    }
}

/// Pixel color blended over black
fn pixel_color(image: &RgbaImage, x: u32, y: u32) -> Color {
    let [r, g, b, a] = image.get_pixel(x, y).0;
    let blend = |c: u8| ((c as u16 * a as u16) / 255) as u8;
    Color::Rgb(blend(r), blend(g), blend(b))
}
