//! Coordinate and size types shared by the shell, device and render layers.
//!
//! Surface space is integer pixels with the origin top-left and +Y down, as
//! delivered by the compositor. Clip space is GL NDC (+Y up); the renderers
//! never see surface coordinates.

mod geometry;

pub use geometry::Geometry;
