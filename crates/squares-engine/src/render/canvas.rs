use anyhow::Result;

use crate::paint::Color;
use crate::scene::{Transform, FOUR_SQUARES};

/// Background left behind by `draw_frame`. Fully transparent, so with an
/// alpha-capable config the compositor shows whatever is underneath.
pub const CLEAR_COLOR: Color = Color::TRANSPARENT;

/// Backend-facing drawing surface.
///
/// Calls arrive in frame order: one `clear`, any number of `fill_quad`, one
/// `present`. Quads are painted in call order.
pub trait Canvas {
    /// Clears color and depth for a new frame.
    fn clear(&mut self, color: Color);

    /// Fills the unit quad transformed by `model`.
    fn fill_quad(&mut self, model: &Transform, color: Color);

    /// Presents the finished frame.
    fn present(&mut self) -> Result<()>;
}

/// Something that can put a finished GL frame on screen.
pub trait SwapTarget {
    fn swap(&mut self) -> Result<()>;
}

/// Draws one square. The model transform is built fresh for every call.
#[inline]
pub fn draw_square<C: Canvas + ?Sized>(canvas: &mut C, x: f32, y: f32, scale: f32, color: Color) {
    let model = Transform::translate_scale(x, y, scale);
    canvas.fill_quad(&model, color);
}

/// Clears, draws the four quadrant squares and presents.
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C) -> Result<()> {
    canvas.clear(CLEAR_COLOR);

    for square in &FOUR_SQUARES {
        draw_square(canvas, square.x, square.y, square.scale, square.color);
    }

    canvas.present()
}
