use crate::paint::Color;

use super::Transform;

/// One square draw: the unit quad scaled by `scale` and moved to `(x, y)` in NDC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SquareCmd {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub color: Color,
}

impl SquareCmd {
    #[inline]
    pub const fn new(x: f32, y: f32, scale: f32, color: Color) -> Self {
        Self { x, y, scale, color }
    }

    #[inline]
    pub const fn model(&self) -> Transform {
        Transform::translate_scale(self.x, self.y, self.scale)
    }
}
