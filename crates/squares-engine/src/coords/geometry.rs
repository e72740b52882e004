/// Window or buffer size in surface pixels.
///
/// Compositors use `0` to mean "client decides", so a zero extent is a valid
/// value here and callers check [`Geometry::is_empty`] before using it as a
/// backing-store size.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extent_is_empty() {
        assert!(Geometry::new(0, 0).is_empty());
        assert!(Geometry::new(400, 0).is_empty());
        assert!(Geometry::new(0, 300).is_empty());
        assert!(!Geometry::new(400, 300).is_empty());
    }
}
