/// 4x4 matrix in column-major order, as `glUniformMatrix4fv` expects with
/// `transpose = false`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    m: [f32; 16],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ],
    };

    /// Model matrix for a square: uniform `scale` on the x/y diagonal and a
    /// translation of `(x, y)`.
    #[inline]
    pub const fn translate_scale(x: f32, y: f32, scale: f32) -> Self {
        let mut m = Self::IDENTITY.m;
        m[0] = scale;
        m[5] = scale;
        m[12] = x;
        m[13] = y;
        Self { m }
    }

    #[inline]
    pub const fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// Columns, for vertex-attribute uploads.
    #[inline]
    pub fn columns(&self) -> [[f32; 4]; 4] {
        let m = &self.m;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }

    /// `M * v` (column vector).
    #[inline]
    pub fn apply(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.m;
        let mut out = [0.0; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = m[row] * v[0] + m[4 + row] * v[1] + m[8 + row] * v[2] + m[12 + row] * v[3];
        }
        out
    }

    /// `v * M` (row vector), the order the square shader applies `projection` in.
    #[inline]
    pub fn apply_row(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.m;
        let mut out = [0.0; 4];
        for (col, o) in out.iter_mut().enumerate() {
            let c = col * 4;
            *o = v[0] * m[c] + v[1] * m[c + 1] + v[2] * m[c + 2] + v[3] * m[c + 3];
        }
        out
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_scale_moves_and_scales_xy() {
        let t = Transform::translate_scale(1.0, -1.0, 2.0);
        assert_eq!(t.apply([-1.0, 1.0, 0.0, 1.0]), [-1.0, 1.0, 0.0, 1.0]);
        assert_eq!(t.apply([0.0, 0.0, 0.0, 1.0]), [1.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn translation_lives_in_the_last_column() {
        let t = Transform::translate_scale(0.25, 0.5, 1.0);
        assert_eq!(t.as_array()[12], 0.25);
        assert_eq!(t.as_array()[13], 0.5);
        assert_eq!(t.columns()[3], [0.25, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn identity_is_neutral_from_both_sides() {
        let v = [0.3, -0.7, 0.0, 1.0];
        assert_eq!(Transform::IDENTITY.apply(v), v);
        assert_eq!(Transform::IDENTITY.apply_row(v), v);
    }

    #[test]
    fn fresh_value_per_draw() {
        // Building one square's transform leaves the next one untouched.
        let a = Transform::translate_scale(1.0, 0.0, 3.0);
        let b = Transform::translate_scale(0.0, 0.0, 1.0);
        assert_ne!(a, b);
        assert_eq!(b, Transform::IDENTITY);
    }
}
