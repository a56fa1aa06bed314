//! Spotlight dimmer: a full-screen shade with one rectangular cut-out.
//!
//! The user drags a rectangle with the left button. While dragging and
//! after release the rectangle is punched out of the shade with rounded
//! corners and outlined in green. The window draws whatever
//! [`Spotlight::render`] returns.

use image::{Rgba, RgbaImage};

use crate::model::{Point, Rect};

/// Alpha of the dimming shade.
pub const DIM_ALPHA: u8 = 180;

/// Corner radius of the cut-out.
pub const CORNER_RADIUS: f32 = 10.0;

/// Outline width of the cut-out.
pub const BORDER_WIDTH: f32 = 3.0;

/// Outline colour, `#00CC7A`.
pub const BORDER_COLOR: Rgba<u8> = Rgba([0x00, 0xCC, 0x7A, 0xFF]);

/// Offset of the close button from the selection's top-right corner.
pub const CLOSE_BUTTON_OFFSET: (i32, i32) = (10, -15);

/// Side of the square close button.
pub const CLOSE_BUTTON_SIZE: i32 = 24;

const CLOSE_BUTTON_FILL: Rgba<u8> = Rgba([0xD9, 0x53, 0x4F, 0xFF]);
const CLOSE_BUTTON_MARK: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

#[derive(Debug, Clone, Default)]
pub struct Spotlight {
    anchor: Point,
    cursor: Point,
    selecting: bool,
    has_selection: bool,
    dark: bool,
}

impl Spotlight {
    pub fn new(dark: bool) -> Self {
        Self {
            dark,
            ..Self::default()
        }
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Left button down: start a fresh selection.
    pub fn begin(&mut self, at: Point) {
        self.anchor = at;
        self.cursor = at;
        self.selecting = true;
        self.has_selection = false;
    }

    pub fn drag(&mut self, to: Point) {
        if self.selecting {
            self.cursor = to;
        }
    }

    pub fn release(&mut self) {
        if self.selecting {
            self.selecting = false;
            self.has_selection = true;
        }
    }

    /// Forget the selection; the whole screen is dimmed again.
    pub fn reset(&mut self) {
        *self = Self::new(self.dark);
    }

    /// The cut-out, while dragging or after release.
    pub fn normalized_selection(&self) -> Option<Rect> {
        (self.selecting || self.has_selection).then(|| Rect::from_corners(self.anchor, self.cursor))
    }

    /// Where the close button goes; only once a selection is complete.
    pub fn close_button_anchor(&self) -> Option<Point> {
        if !self.has_selection {
            return None;
        }
        let r = Rect::from_corners(self.anchor, self.cursor);
        let (dx, dy) = CLOSE_BUTTON_OFFSET;
        Some(Point::new(r.right() + dx, r.y + dy))
    }

    /// Square close button, top-left corner at [`close_button_anchor`].
    ///
    /// [`close_button_anchor`]: Spotlight::close_button_anchor
    pub fn close_button_rect(&self) -> Option<Rect> {
        self.close_button_anchor()
            .map(|p| Rect::new(p.x, p.y, CLOSE_BUTTON_SIZE, CLOSE_BUTTON_SIZE))
    }

    pub fn hits_close_button(&self, at: Point) -> bool {
        self.close_button_rect().is_some_and(|r| r.contains(at))
    }

    fn shade(&self) -> Rgba<u8> {
        if self.dark {
            Rgba([0, 0, 0, DIM_ALPHA])
        } else {
            Rgba([255, 255, 255, DIM_ALPHA])
        }
    }

    /// Rasterize the shade for a `width` x `height` screen.
    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, self.shade());
        let Some(sel) = self.normalized_selection() else {
            return img;
        };
        if sel.is_empty() {
            return img;
        }

        let pad = BORDER_WIDTH.ceil() as i32 + 1;
        let x0 = (sel.x - pad).max(0);
        let y0 = (sel.y - pad).max(0);
        let x1 = (sel.right() + pad).min(width as i32);
        let y1 = (sel.bottom() + pad).min(height as i32);
        let half_border = BORDER_WIDTH / 2.0;

        for y in y0..y1 {
            for x in x0..x1 {
                let d = rounded_rect_distance(&sel, x as f32 + 0.5, y as f32 + 0.5);
                if d.abs() <= half_border {
                    img.put_pixel(x as u32, y as u32, BORDER_COLOR);
                } else if d < 0.0 {
                    img.put_pixel(x as u32, y as u32, Rgba([0, 0, 0, 0]));
                }
            }
        }

        if let Some(button) = self.close_button_rect() {
            draw_close_button(&mut img, button);
        }
        img
    }
}

/// Filled square with a white cross, clipped to the image.
fn draw_close_button(img: &mut RgbaImage, r: Rect) {
    let inset = r.width / 4;
    for y in r.y.max(0)..r.bottom().min(img.height() as i32) {
        for x in r.x.max(0)..r.right().min(img.width() as i32) {
            let (lx, ly) = (x - r.x, y - r.y);
            let in_cross = lx >= inset
                && lx < r.width - inset
                && ly >= inset
                && ly < r.height - inset
                && ((lx - ly).abs() <= 1 || (lx + ly - (r.width - 1)).abs() <= 1);
            let px = if in_cross {
                CLOSE_BUTTON_MARK
            } else {
                CLOSE_BUTTON_FILL
            };
            img.put_pixel(x as u32, y as u32, px);
        }
    }
}

/// Signed distance from `(px, py)` to the outline of `r` with
/// [`CORNER_RADIUS`] corners; negative inside.
fn rounded_rect_distance(r: &Rect, px: f32, py: f32) -> f32 {
    let hw = r.width as f32 / 2.0;
    let hh = r.height as f32 / 2.0;
    let radius = CORNER_RADIUS.min(hw).min(hh);
    let cx = r.x as f32 + hw;
    let cy = r.y as f32 + hh;
    let qx = (px - cx).abs() - (hw - radius);
    let qy = (py - cy).abs() - (hh - radius);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_dims_everything() {
        let s = Spotlight::new(true);
        let img = s.render(10, 10);
        assert!(img.pixels().all(|p| *p == Rgba([0, 0, 0, DIM_ALPHA])));
        assert!(s.close_button_anchor().is_none());
    }

    #[test]
    fn selection_is_cut_out_with_border() {
        let mut s = Spotlight::new(false);
        s.begin(Point::new(80, 60));
        s.drag(Point::new(20, 10));
        s.release();

        assert_eq!(s.normalized_selection(), Some(Rect::new(20, 10, 60, 50)));
        let img = s.render(100, 100);
        assert_eq!(img.get_pixel(50, 35)[3], 0);
        assert_eq!(*img.get_pixel(50, 10), BORDER_COLOR);
        assert_eq!(*img.get_pixel(5, 5), Rgba([255, 255, 255, DIM_ALPHA]));
        // rounded corner stays dimmed
        assert_eq!(img.get_pixel(20, 10)[3], DIM_ALPHA);
    }

    #[test]
    fn close_button_follows_top_right() {
        let mut s = Spotlight::new(true);
        s.begin(Point::new(20, 40));
        s.drag(Point::new(120, 90));
        assert!(s.close_button_anchor().is_none());
        s.release();
        assert_eq!(s.close_button_anchor(), Some(Point::new(130, 25)));
    }

    #[test]
    fn close_button_is_drawn_and_hit_tested() {
        let mut s = Spotlight::new(true);
        s.begin(Point::new(20, 40));
        s.drag(Point::new(120, 90));
        s.release();

        assert!(s.hits_close_button(Point::new(135, 30)));
        assert!(!s.hits_close_button(Point::new(60, 60)));
        let img = s.render(200, 200);
        assert_eq!(*img.get_pixel(131, 26), CLOSE_BUTTON_FILL);
        assert_eq!(*img.get_pixel(130 + 12, 25 + 12), CLOSE_BUTTON_MARK);
    }

    #[test]
    fn new_press_clears_previous_selection() {
        let mut s = Spotlight::new(true);
        s.begin(Point::new(0, 0));
        s.drag(Point::new(30, 30));
        s.release();
        s.begin(Point::new(5, 5));
        assert!(s.close_button_anchor().is_none());
        assert_eq!(s.normalized_selection(), Some(Rect::new(5, 5, 0, 0)));
    }
}
