//! Freehand raster canvas with stroke-level undo/redo.
//!
//! Used by both the full-screen annotation layer (transparent background)
//! and the picture-in-picture sketch pad (white background). Pixels are
//! drawn into the live raster as the pointer moves; a snapshot is
//! committed to the [`History`] only when a stroke completes.

use image::{Rgba, RgbaImage};

use crate::history::History;
pub use crate::model::Point;
use crate::model::{PenColor, HISTORY_CAPACITY, MAX_PEN_WIDTH, MIN_PEN_WIDTH};

/// Fill used for blank snapshots and newly exposed area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Transparent,
    White,
}

impl Background {
    fn pixel(self) -> Rgba<u8> {
        match self {
            Background::Transparent => Rgba([0, 0, 0, 0]),
            Background::White => Rgba([255, 255, 255, 255]),
        }
    }
}

/// The in-progress stroke and pen settings.
#[derive(Debug, Clone)]
struct LiveStroke {
    points: Vec<Point>,
    color: PenColor,
    width: u32,
    dirty: bool,
}

pub struct Canvas {
    image: RgbaImage,
    background: Background,
    history: History<RgbaImage>,
    live: LiveStroke,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Background, pen: PenColor, pen_width: u32) -> Self {
        Self::with_capacity(width, height, background, pen, pen_width, HISTORY_CAPACITY)
    }

    pub fn with_capacity(
        width: u32,
        height: u32,
        background: Background,
        pen: PenColor,
        pen_width: u32,
        capacity: usize,
    ) -> Self {
        let image = RgbaImage::from_pixel(width, height, background.pixel());
        Self {
            history: History::with_capacity(image.clone(), capacity),
            image,
            background,
            live: LiveStroke {
                points: Vec::new(),
                color: pen,
                width: pen_width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH),
                dirty: false,
            },
        }
    }

    /// The live raster, including any uncommitted stroke.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn history(&self) -> &History<RgbaImage> {
        &self.history
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pen_color(&self) -> PenColor {
        self.live.color
    }

    pub fn pen_width(&self) -> u32 {
        self.live.width
    }

    pub fn set_pen_color(&mut self, color: PenColor) {
        self.live.color = color;
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.live.width = width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH);
    }

    pub fn is_drawing(&self) -> bool {
        !self.live.points.is_empty()
    }

    /// True while a stroke has touched pixels that are not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.live.dirty
    }

    /// Button down: start a stroke with a single dot.
    pub fn begin_stroke(&mut self, at: Point) {
        self.live.points.clear();
        self.live.points.push(at);
        self.stamp(at);
        self.live.dirty = true;
    }

    /// Pointer moved with the button held.
    pub fn extend_stroke(&mut self, to: Point) {
        let Some(&from) = self.live.points.last() else {
            return;
        };
        self.segment(from, to);
        self.live.points.push(to);
        self.live.dirty = true;
    }

    /// Button up: commit the stroke as one history entry.
    pub fn end_stroke(&mut self) {
        if self.live.points.is_empty() {
            return;
        }
        self.live.points.clear();
        self.live.dirty = false;
        self.history.commit(self.image.clone());
    }

    pub fn undo(&mut self) {
        self.abandon_stroke();
        let (width, height) = (self.width(), self.height());
        self.image = fit(self.history.undo(), width, height, self.background);
    }

    pub fn redo(&mut self) {
        self.abandon_stroke();
        let (width, height) = (self.width(), self.height());
        self.image = fit(self.history.redo(), width, height, self.background);
    }

    /// Blank the canvas and forget all history.
    pub fn clear(&mut self) {
        self.abandon_stroke();
        self.image = self.blank(self.width(), self.height());
        self.history.clear(self.image.clone());
    }

    /// Change the raster size, keeping existing pixels anchored top-left.
    ///
    /// History snapshots keep their original size. Undo and redo fit them
    /// to whatever size the canvas has at that point.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width() && height == self.height() {
            return;
        }
        self.image = fit(&self.image, width, height, self.background);
    }

    fn blank(&self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, self.background.pixel())
    }

    fn abandon_stroke(&mut self) {
        self.live.points.clear();
        self.live.dirty = false;
    }

    fn segment(&mut self, from: Point, to: Point) {
        let dx = (to.x - from.x) as f32;
        let dy = (to.y - from.y) as f32;
        let length = (dx * dx + dy * dy).sqrt();
        let spacing = (self.live.width as f32 / 4.0).max(1.0);
        let steps = (length / spacing).ceil().max(1.0) as i32;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let p = Point::new(
                from.x + (dx * t).round() as i32,
                from.y + (dy * t).round() as i32,
            );
            self.stamp(p);
        }
    }

    /// Fill a round pen tip centred on `at`.
    fn stamp(&mut self, at: Point) {
        let color = self.live.color.to_rgba();
        let radius = self.live.width as f32 / 2.0;
        let reach = radius.ceil() as i32;
        let (w, h) = (self.width() as i32, self.height() as i32);
        for y in (at.y - reach).max(0)..=(at.y + reach).min(h - 1) {
            for x in (at.x - reach).max(0)..=(at.x + reach).min(w - 1) {
                let (ox, oy) = ((x - at.x) as f32, (y - at.y) as f32);
                if ox * ox + oy * oy <= radius * radius {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

/// Copy `source` onto a `width` x `height` raster, anchored top-left.
fn fit(source: &RgbaImage, width: u32, height: u32, background: Background) -> RgbaImage {
    if source.dimensions() == (width, height) {
        return source.clone();
    }
    let mut fitted = RgbaImage::from_pixel(width, height, background.pixel());
    image::imageops::replace(&mut fitted, source, 0, 0);
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(40, 30, Background::White, PenColor::BLACK, 3)
    }

    #[test]
    fn stroke_draws_pen_pixels() {
        let mut c = canvas();
        c.begin_stroke(Point::new(5, 5));
        c.extend_stroke(Point::new(20, 5));
        assert_eq!(*c.image().get_pixel(12, 5), Rgba([0, 0, 0, 255]));
        assert_eq!(*c.image().get_pixel(12, 20), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn only_completed_strokes_are_committed() {
        let mut c = canvas();
        c.begin_stroke(Point::new(5, 5));
        c.extend_stroke(Point::new(10, 10));
        assert!(c.is_dirty());
        assert_eq!(c.history().len(), 1);
        c.end_stroke();
        assert!(!c.is_dirty());
        assert_eq!(c.history().len(), 2);
    }

    #[test]
    fn end_without_begin_is_noop() {
        let mut c = canvas();
        c.end_stroke();
        assert_eq!(c.history().len(), 1);
    }

    #[test]
    fn extend_without_begin_is_ignored() {
        let mut c = canvas();
        c.extend_stroke(Point::new(10, 10));
        assert!(!c.is_dirty());
        assert_eq!(*c.image().get_pixel(10, 10), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn undo_restores_blank_and_redo_restores_stroke() {
        let mut c = canvas();
        c.begin_stroke(Point::new(5, 5));
        c.end_stroke();
        c.undo();
        assert_eq!(*c.image().get_pixel(5, 5), Rgba([255, 255, 255, 255]));
        c.redo();
        assert_eq!(*c.image().get_pixel(5, 5), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn stamp_near_edges_stays_in_bounds() {
        let mut c = canvas();
        c.set_pen_width(20);
        c.begin_stroke(Point::new(0, 0));
        c.extend_stroke(Point::new(39, 29));
        c.extend_stroke(Point::new(-50, 100));
        c.end_stroke();
        assert_eq!(c.history().len(), 2);
    }

    #[test]
    fn clear_resets_history() {
        let mut c = canvas();
        c.begin_stroke(Point::new(5, 5));
        c.end_stroke();
        c.clear();
        assert_eq!(c.history().len(), 1);
        assert_eq!(*c.image().get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn resize_keeps_content_top_left() {
        let mut c = Canvas::new(10, 10, Background::Transparent, PenColor::RED, 1);
        c.begin_stroke(Point::new(2, 2));
        c.end_stroke();
        c.resize(20, 15);
        assert_eq!((c.width(), c.height()), (20, 15));
        assert_eq!(*c.image().get_pixel(2, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*c.image().get_pixel(15, 12), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn undo_after_grow_keeps_current_size() {
        let mut c = canvas();
        c.begin_stroke(Point::new(5, 5));
        c.end_stroke();
        c.resize(100, 80);

        c.undo();
        assert_eq!((c.width(), c.height()), (100, 80));
        assert_eq!(*c.image().get_pixel(5, 5), Rgba([255, 255, 255, 255]));

        c.begin_stroke(Point::new(70, 60));
        c.end_stroke();
        assert_eq!(*c.image().get_pixel(70, 60), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn redo_after_shrink_crops_to_current_size() {
        let mut c = canvas();
        c.begin_stroke(Point::new(5, 5));
        c.end_stroke();
        c.undo();
        c.resize(20, 10);

        c.redo();
        assert_eq!((c.width(), c.height()), (20, 10));
        assert_eq!(*c.image().get_pixel(5, 5), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn pen_width_is_clamped() {
        let mut c = canvas();
        c.set_pen_width(0);
        assert_eq!(c.pen_width(), MIN_PEN_WIDTH);
        c.set_pen_width(1000);
        assert_eq!(c.pen_width(), MAX_PEN_WIDTH);
    }
}
