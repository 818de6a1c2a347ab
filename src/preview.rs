//! Media card previews
//!
//! Photos are rendered as half-block RGB cells (one terminal cell carries
//! two vertically stacked pixels via the upper-half-block glyph). Videos
//! get a placeholder card; they are handed to the external player instead.
//! Decoded previews go through a small LRU cache so flipping back and
//! forth over the same items stays cheap.

use crate::domain::{MediaId, MediaItem, MediaType};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of cached previews.
const CACHE_SIZE: usize = 12;

/// A photo rendered to styled terminal lines.
#[derive(Debug)]
pub struct ImagePreview {
    pub lines: Vec<Line<'static>>,
    /// Cell budget the preview was rendered for.
    pub cols: u16,
    pub rows: u16,
}

#[derive(Debug, Clone)]
pub enum PreviewState {
    Ready(Arc<ImagePreview>),
    /// Nothing renderable in-terminal (videos, unsupported codecs).
    Placeholder(String),
    Error(String),
}

/// Renders a photo into at most `max_cols` x `max_rows` terminal cells.
pub fn render_image(
    path: &std::path::Path,
    max_cols: u16,
    max_rows: u16,
) -> Result<ImagePreview, String> {
    if max_cols == 0 || max_rows == 0 {
        return Err("no room to render".to_string());
    }

    let img = image::open(path).map_err(|e| e.to_string())?;
    // Two pixel rows per terminal row.
    let thumb = img
        .thumbnail(max_cols as u32, max_rows as u32 * 2)
        .to_rgb8();

    let width = thumb.width();
    let height = thumb.height();
    let mut lines = Vec::with_capacity(height.div_ceil(2) as usize);

    for y in (0..height).step_by(2) {
        let mut spans = Vec::with_capacity(width as usize);
        for x in 0..width {
            let top = thumb.get_pixel(x, y).0;
            let bottom = if y + 1 < height {
                thumb.get_pixel(x, y + 1).0
            } else {
                [0, 0, 0]
            };
            spans.push(Span::styled(
                "\u{2580}",
                Style::default()
                    .fg(Color::Rgb(top[0], top[1], top[2]))
                    .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
            ));
        }
        lines.push(Line::from(spans));
    }

    Ok(ImagePreview {
        lines,
        cols: max_cols,
        rows: max_rows,
    })
}

/// Per-session preview cache with LRU eviction (most recent at the end of
/// the access list).
#[derive(Debug, Default)]
pub struct PreviewManager {
    cache: HashMap<MediaId, Arc<ImagePreview>>,
    access_order: Vec<MediaId>,
}

impl PreviewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the preview for an item, decoding and caching on miss.
    /// A cached preview rendered for a different cell budget is redone.
    pub fn preview_for(&mut self, item: &MediaItem, max_cols: u16, max_rows: u16) -> PreviewState {
        if item.media_type == MediaType::Video {
            return PreviewState::Placeholder(format!(
                "{} \u{2014} press o to play",
                item.media_type.label()
            ));
        }

        if let Some(cached) = self.cache.get(&item.id) {
            if cached.cols == max_cols && cached.rows == max_rows {
                let cached = Arc::clone(cached);
                self.touch(&item.id);
                return PreviewState::Ready(cached);
            }
        }

        match render_image(&item.path, max_cols, max_rows) {
            Ok(preview) => {
                let preview = Arc::new(preview);
                self.insert(item.id.clone(), Arc::clone(&preview));
                PreviewState::Ready(preview)
            }
            Err(err) => PreviewState::Error(err),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.access_order.clear();
    }

    fn touch(&mut self, id: &MediaId) {
        self.access_order.retain(|p| p != id);
        self.access_order.push(id.clone());
    }

    fn insert(&mut self, id: MediaId, preview: Arc<ImagePreview>) {
        if self.cache.contains_key(&id) {
            self.access_order.retain(|p| p != &id);
        }

        if self.cache.len() >= CACHE_SIZE && !self.cache.contains_key(&id) {
            if let Some(oldest) = self.access_order.first().cloned() {
                self.cache.remove(&oldest);
                self.access_order.remove(0);
            }
        }

        self.cache.insert(id.clone(), preview);
        self.access_order.push(id);
    }
}
