use crate::paint::Color;

use super::SquareCmd;

/// Unit quad in NDC, drawn as a triangle fan. Counter-clockwise, so it
/// survives back-face culling. Spans `x ∈ [-1, 0]`, `y ∈ [0, 1]`.
pub const QUAD_VERTICES: [[f32; 2]; 4] = [
    [0.0, 1.0],
    [-1.0, 1.0],
    [-1.0, 0.0],
    [0.0, 0.0],
];

/// The fan above as an indexed triangle list, for APIs without fans.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// The frame: one square per screen quadrant.
pub const FOUR_SQUARES: [SquareCmd; 4] = [
    SquareCmd::new(0.0, 0.0, 1.0, Color::CYAN),
    SquareCmd::new(1.0, 0.0, 1.0, Color::YELLOW),
    SquareCmd::new(0.0, -1.0, 1.0, Color::MAGENTA),
    SquareCmd::new(1.0, -1.0, 1.0, Color::WHITE),
];
