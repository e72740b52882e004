//! CPU reference canvas.
//!
//! Rasterizes the same quads the GPU paths draw, into an RGBA8 back buffer,
//! and copies it to the front buffer on `present`. Used to check frame
//! content without a display. Coverage follows GL's pixel-center rule and
//! clockwise or degenerate quads are culled, matching `GL_CULL_FACE`.
//!
//! Only axis-aligned quads are supported, which is all [`Transform`] can
//! express.

use anyhow::Result;

use crate::coords::Geometry;
use crate::paint::Color;
use crate::scene::{Transform, QUAD_VERTICES};

use super::canvas::Canvas;

const PROJECTION: Transform = Transform::IDENTITY;

/// Double-buffered software framebuffer.
#[derive(Debug, Clone)]
pub struct SoftCanvas {
    size: Geometry,
    back: Vec<[u8; 4]>,
    front: Vec<[u8; 4]>,
    presented: u64,
}

impl SoftCanvas {
    pub fn new(size: Geometry) -> Self {
        let len = pixel_count(size);
        Self {
            size,
            back: vec![[0; 4]; len],
            front: vec![[0; 4]; len],
            presented: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> Geometry {
        self.size
    }

    /// Number of frames presented so far.
    #[inline]
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Last presented frame, row-major from the top-left.
    #[inline]
    pub fn front(&self) -> &[[u8; 4]] {
        &self.front
    }

    /// Presented pixel at `(x, y)`; `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.front
            .get((y * self.size.width + x) as usize)
            .copied()
    }

    /// Reallocates both buffers. Previous content is discarded.
    pub fn resize(&mut self, size: Geometry) {
        if size == self.size {
            return;
        }
        let len = pixel_count(size);
        self.size = size;
        self.back = vec![[0; 4]; len];
        self.front = vec![[0; 4]; len];
    }
}

fn pixel_count(size: Geometry) -> usize {
    if size.is_empty() {
        0
    } else {
        size.width as usize * size.height as usize
    }
}

impl Canvas for SoftCanvas {
    fn clear(&mut self, color: Color) {
        self.back.fill(color.to_rgba8());
    }

    fn fill_quad(&mut self, model: &Transform, color: Color) {
        if self.size.is_empty() {
            return;
        }

        let mut px = [(0.0f32, 0.0f32); 4];
        let mut ndc = [[0.0f32; 2]; 4];
        for (i, v) in QUAD_VERTICES.iter().enumerate() {
            let clip = PROJECTION.apply_row(model.apply([v[0], v[1], 0.0, 1.0]));
            let (x, y) = (clip[0] / clip[3], clip[1] / clip[3]);
            ndc[i] = [x, y];
            px[i] = ndc_to_pixels(self.size, x, y);
        }

        if signed_area(&ndc) <= 0.0 {
            return;
        }

        let span = |axis: fn(&(f32, f32)) -> f32| {
            px.iter()
                .map(axis)
                .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
        };
        let (min_x, max_x) = span(|p| p.0);
        let (min_y, max_y) = span(|p| p.1);

        // Pixel (i, j) is covered when its center lies in [min, max).
        let x0 = (min_x - 0.5).ceil().max(0.0) as i32;
        let x1 = ((max_x - 0.5).ceil() as i32).min(self.size.width);
        let y0 = (min_y - 0.5).ceil().max(0.0) as i32;
        let y1 = ((max_y - 0.5).ceil() as i32).min(self.size.height);

        let rgba = color.to_rgba8();
        let w = self.size.width;
        for y in y0..y1 {
            let row = (y * w) as usize;
            for x in x0..x1 {
                self.back[row + x as usize] = rgba;
            }
        }
    }

    fn present(&mut self) -> Result<()> {
        self.front.copy_from_slice(&self.back);
        self.presented += 1;
        Ok(())
    }
}

/// NDC to pixel coordinates, origin top-left and +Y down.
fn ndc_to_pixels(size: Geometry, x: f32, y: f32) -> (f32, f32) {
    let (w, h) = (size.width as f32, size.height as f32);
    ((x + 1.0) * 0.5 * w, (1.0 - y) * 0.5 * h)
}

fn signed_area(v: &[[f32; 2]; 4]) -> f32 {
    (0..v.len())
        .map(|i| {
            let a = v[i];
            let b = v[(i + 1) % v.len()];
            a[0] * b[1] - b[0] * a[1]
        })
        .sum::<f32>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Quadrant;
    use crate::render::{draw_frame, draw_square};
    use crate::window::RuntimeConfig;

    const CYAN: [u8; 4] = [0, 255, 255, 255];
    const YELLOW: [u8; 4] = [255, 255, 0, 255];
    const MAGENTA: [u8; 4] = [255, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn quadrant_is(canvas: &SoftCanvas, x0: i32, y0: i32, expected: [u8; 4]) {
        let half_w = canvas.size().width / 2;
        let half_h = canvas.size().height / 2;
        for y in y0..y0 + half_h {
            for x in x0..x0 + half_w {
                assert_eq!(canvas.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn each_quadrant_holds_its_color_after_one_frame() {
        let mut canvas = SoftCanvas::new(Geometry::new(256, 256));
        draw_frame(&mut canvas).unwrap();

        quadrant_is(&canvas, 0, 0, CYAN);
        quadrant_is(&canvas, 128, 0, YELLOW);
        quadrant_is(&canvas, 0, 128, MAGENTA);
        quadrant_is(&canvas, 128, 128, WHITE);
    }

    fn square_under(quadrant: Quadrant) -> [u8; 4] {
        match quadrant {
            Quadrant::TopLeft => CYAN,
            Quadrant::TopRight => YELLOW,
            Quadrant::BottomLeft => MAGENTA,
            Quadrant::BottomRight => WHITE,
        }
    }

    #[test]
    fn hosted_window_clicks_name_the_square_under_the_pointer() {
        let size = RuntimeConfig::default().initial_size;
        let mut canvas = SoftCanvas::new(Geometry::new(size.width as i32, size.height as i32));
        draw_frame(&mut canvas).unwrap();

        let clicks = [
            (50, 50),
            (50, 200),
            (200, 50),
            (200, 200),
            (128, 128),
            (127, 127),
            (128, 0),
            (0, 128),
            (255, 255),
        ];
        for (x, y) in clicks {
            let quadrant = Quadrant::classify(x, y);
            assert_eq!(
                canvas.pixel(x, y),
                Some(square_under(quadrant)),
                "click ({x}, {y}) reports {quadrant}"
            );
        }
    }

    #[test]
    fn odd_sizes_still_cover_every_pixel() {
        let mut canvas = SoftCanvas::new(Geometry::new(251, 97));
        draw_frame(&mut canvas).unwrap();
        assert!(canvas.front().iter().all(|p| p[3] == 255));
    }

    #[test]
    fn repeated_frames_are_identical() {
        let mut canvas = SoftCanvas::new(Geometry::new(64, 48));
        draw_frame(&mut canvas).unwrap();
        let first = canvas.front().to_vec();
        draw_frame(&mut canvas).unwrap();
        assert_eq!(canvas.front(), &first[..]);
        assert_eq!(canvas.presented(), 2);
    }

    #[test]
    fn nothing_shows_until_present() {
        let mut canvas = SoftCanvas::new(Geometry::new(8, 8));
        canvas.clear(Color::BLACK);
        draw_square(&mut canvas, 1.0, 0.0, 1.0, Color::WHITE);
        assert_eq!(canvas.pixel(7, 0), Some([0, 0, 0, 0]));
        canvas.present().unwrap();
        assert_eq!(canvas.pixel(7, 0), Some(WHITE));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn scaled_square_covers_the_scaled_region() {
        // Half scale anchored at the center: the quad spans x ∈ [-0.5, 0], y ∈ [0, 0.5].
        let mut canvas = SoftCanvas::new(Geometry::new(100, 100));
        canvas.clear(Color::TRANSPARENT);
        draw_square(&mut canvas, 0.0, 0.0, 0.5, Color::CYAN);
        canvas.present().unwrap();

        assert_eq!(canvas.pixel(30, 30), Some(CYAN));
        assert_eq!(canvas.pixel(49, 26), Some(CYAN));
        assert_eq!(canvas.pixel(20, 30), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(30, 20), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(50, 30), Some([0, 0, 0, 0]));
    }

    #[test]
    fn later_draws_paint_over_earlier_ones() {
        let mut canvas = SoftCanvas::new(Geometry::new(16, 16));
        canvas.clear(Color::TRANSPARENT);
        draw_square(&mut canvas, 0.0, 0.0, 1.0, Color::CYAN);
        draw_square(&mut canvas, 0.0, 0.0, 1.0, Color::MAGENTA);
        canvas.present().unwrap();
        assert_eq!(canvas.pixel(2, 2), Some(MAGENTA));
    }

    #[test]
    fn negative_scale_turns_the_quad_around() {
        // Uniform -1 is a half turn, still front-facing: lands bottom-right.
        let mut canvas = SoftCanvas::new(Geometry::new(16, 16));
        canvas.clear(Color::TRANSPARENT);
        draw_square(&mut canvas, 0.0, 0.0, -1.0, Color::WHITE);
        canvas.present().unwrap();
        assert_eq!(canvas.pixel(12, 12), Some(WHITE));
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn zero_scale_draws_nothing() {
        let mut canvas = SoftCanvas::new(Geometry::new(16, 16));
        canvas.clear(Color::TRANSPARENT);
        draw_square(&mut canvas, 0.0, 0.0, 0.0, Color::WHITE);
        canvas.present().unwrap();
        assert!(canvas.front().iter().all(|p| *p == [0, 0, 0, 0]));
    }

    #[test]
    fn resize_reallocates_and_bounds_checks() {
        let mut canvas = SoftCanvas::new(Geometry::new(4, 4));
        canvas.resize(Geometry::new(10, 2));
        assert_eq!(canvas.front().len(), 20);
        assert_eq!(canvas.pixel(9, 1), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(10, 1), None);
        assert_eq!(canvas.pixel(-1, 0), None);
    }
}
