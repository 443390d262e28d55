//! Text primitives and font-backed text measurement.
//!
//! A [`Text`] is a single run of text anchored at a position. How the run
//! sits relative to that position is controlled by [`TextHAlign`] and
//! [`TextVAlign`]. Shaping and measurement go through a process-wide
//! `cosmic-text` font system, shared by [`measure_text`] and the raster
//! surface.
//!
//! ```
//! use collage_core::draw::{TextHAlign, measure_text, text};
//!
//! let label = text(|t| {
//!     t.content = "Hello".to_string();
//!     t.h_align = TextHAlign::Middle;
//! });
//! let metrics = measure_text(&label);
//! assert!(metrics.width > 0.0);
//! ```

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Buffer, FontSystem, Metrics, Shaping, SwashCache};
use log::{debug, info};

use crate::{
    color::Color,
    draw::{FontDefinition, TextHAlign, TextVAlign},
    geometry::Point,
};

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A single run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub position: Point,
    pub color: Color,
    pub font: FontDefinition,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            content: String::new(),
            position: Point::ORIGIN,
            color: Color::default(),
            font: FontDefinition::default(),
            h_align: TextHAlign::default(),
            v_align: TextVAlign::default(),
        }
    }
}

impl Text {
    /// Returns the top-left corner of the shaped layout box, taking the
    /// alignment into account.
    pub fn layout_origin(&self, metrics: &TextMetrics) -> Point {
        let baseline_y = self.position.y + self.v_align.baseline_shift(self.font.size());
        Point::new(
            self.position.x + self.h_align.offset(metrics.width),
            baseline_y - metrics.baseline,
        )
    }
}

/// The measured extent of a shaped text run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the widest line.
    pub width: f64,
    /// Total height of all lines.
    pub height: f64,
    /// Distance from the top of the layout box to the first baseline.
    pub baseline: f64,
}

/// Measures `text` with the shared font system.
pub fn measure_text(text: &Text) -> TextMetrics {
    text_manager().measure(&text.content, &text.font)
}

/// Shapes, measures and rasterizes text with a reusable [`FontSystem`].
///
/// Creating a font system scans the installed fonts, so a single instance is
/// kept for the whole process (see [`text_manager`]).
pub(crate) struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
    swash_cache: Mutex<SwashCache>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
            swash_cache: Mutex::new(SwashCache::new()),
        }
    }

    /// Measures `content` shaped with `font`.
    ///
    /// Empty content measures as zero. When shaping yields no layout runs
    /// (no usable font installed) the width is estimated from the character
    /// count.
    pub(crate) fn measure(&self, content: &str, font: &FontDefinition) -> TextMetrics {
        if content.is_empty() {
            return TextMetrics::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");
        let metrics = metrics_for(font);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        buffer.set_size(None, None);
        buffer.set_text(content, &font.to_attrs(), Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        let mut baseline: Option<f32> = None;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                width = width.max(last.x + last.w);
            }
            baseline.get_or_insert(run.line_y);
            height += metrics.line_height;
        }

        if height == 0.0 {
            debug!(content; "No layout runs, estimating text size");
            let size = font.size();
            return TextMetrics {
                width: content.chars().count() as f64 * size * 0.55,
                height: size * LINE_HEIGHT_FACTOR,
                baseline: size,
            };
        }

        TextMetrics {
            width: f64::from(width),
            height: f64::from(height),
            baseline: f64::from(baseline.unwrap_or(metrics.font_size)),
        }
    }

    /// Rasterizes the glyphs of `content` in layout-box coordinates.
    ///
    /// `paint` receives `(x, y, width, height, rgba)` coverage rectangles,
    /// where `rgba` is un-premultiplied with coverage folded into alpha.
    pub(crate) fn draw_glyphs<F>(&self, content: &str, font: &FontDefinition, color: Color, mut paint: F)
    where
        F: FnMut(i32, i32, u32, u32, [u8; 4]),
    {
        if content.is_empty() {
            return;
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");
        let mut swash_cache = self.swash_cache.lock().expect("failed to lock SwashCache");
        let mut buffer = Buffer::new(&mut font_system, metrics_for(font));
        let mut buffer = buffer.borrow_with(&mut font_system);
        buffer.set_size(None, None);
        buffer.set_text(content, &font.to_attrs(), Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let [r, g, b, a] = color.to_rgba8();
        let text_color = cosmic_text::Color::rgba(r, g, b, a);
        buffer.draw(&mut swash_cache, text_color, |x, y, w, h, glyph_color| {
            paint(
                x,
                y,
                w,
                h,
                [glyph_color.r(), glyph_color.g(), glyph_color.b(), glyph_color.a()],
            );
        });
    }
}

fn metrics_for(font: &FontDefinition) -> Metrics {
    let size = font.size().max(1.0);
    Metrics::new(size as f32, (size * LINE_HEIGHT_FACTOR) as f32)
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

/// Returns the process-wide text manager, creating it on first use.
pub(crate) fn text_manager() -> &'static TextManager {
    TEXT_MANAGER.get_or_init(TextManager::new)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn label(content: &str) -> Text {
        Text {
            content: content.to_string(),
            ..Text::default()
        }
    }

    #[test]
    fn test_measure_empty_text() {
        let metrics = measure_text(&label(""));
        assert_eq!(metrics, TextMetrics::default());
    }

    #[test]
    fn test_measure_longer_text_is_wider() {
        let short = measure_text(&label("ab"));
        let long = measure_text(&label("abcdefgh"));
        assert!(short.width > 0.0);
        assert!(long.width > short.width);
        assert!(short.height > 0.0);
    }

    #[test]
    fn test_measure_multiline_adds_height() {
        let one = measure_text(&label("line"));
        let two = measure_text(&label("line\nline"));
        assert!(two.height > one.height);
    }

    #[test]
    fn test_layout_origin_alignment() {
        let metrics = TextMetrics {
            width: 40.0,
            height: 12.0,
            baseline: 10.0,
        };
        let mut text = label("x");
        text.position = Point::new(100.0, 50.0);

        let origin = text.layout_origin(&metrics);
        assert_approx_eq!(f64, origin.x, 100.0);
        assert_approx_eq!(f64, origin.y, 40.0);

        text.h_align = TextHAlign::Right;
        text.v_align = TextVAlign::Hanging;
        let origin = text.layout_origin(&metrics);
        assert_approx_eq!(f64, origin.x, 60.0);
        // Hanging moves the baseline 0.8 em (12 * 0.8) below the anchor
        assert_approx_eq!(f64, origin.y, 50.0 + 9.6 - 10.0);
    }

    #[test]
    fn test_text_manager_is_shared() {
        assert!(std::ptr::eq(text_manager(), text_manager()));
    }
}
