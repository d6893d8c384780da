//=========================================================================
// 2D Affine Transform
//
// Column-major 2x3 matrix in the usual canvas layout:
//
// ```text
//   | a  c  e |     x' = a*x + c*y + e
//   | b  d  f |     y' = b*x + d*y + f
// ```
//
// Composition follows canvas semantics: `current.then(m)` applies `m` to
// local coordinates first, so successive translate/rotate/scale calls
// nest the way a drawing context expects.
//
//=========================================================================

/// 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    //--- Constructors -----------------------------------------------------

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self { e: tx, f: ty, ..Self::IDENTITY }
    }

    /// Clockwise rotation (y axis points down) by `radians`.
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    //--- Composition ------------------------------------------------------

    /// Returns `self × m`: `m` is applied first, then `self`.
    pub fn then(&self, m: &Transform) -> Transform {
        Transform {
            a: self.a * m.a + self.c * m.b,
            b: self.b * m.a + self.d * m.b,
            c: self.a * m.c + self.c * m.d,
            d: self.b * m.c + self.d * m.d,
            e: self.a * m.e + self.c * m.f + self.e,
            f: self.b * m.e + self.d * m.f + self.f,
        }
    }

    /// Maps a point through the transform.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        Some(Transform {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4
    }

    #[test]
    fn translation_moves_points() {
        let t = Transform::translation(3.0, -2.0);
        assert_eq!(t.apply(1.0, 1.0), (4.0, -1.0));
    }

    #[test]
    fn quarter_turn_maps_x_axis_onto_y_axis() {
        let r = Transform::rotation(FRAC_PI_2);
        assert!(close(r.apply(1.0, 0.0), (0.0, 1.0)));
    }

    #[test]
    fn then_applies_local_transform_first() {
        // translate then scale: local point is scaled, then translated
        let t = Transform::translation(10.0, 10.0).then(&Transform::scaling(-1.0, 1.0));
        assert_eq!(t.apply(2.0, 3.0), (8.0, 13.0));
    }

    #[test]
    fn invert_undoes_transform() {
        let t = Transform::translation(5.0, 7.0)
            .then(&Transform::rotation(0.7))
            .then(&Transform::scaling(2.0, -3.0));
        let inv = t.invert().expect("transform should be invertible");
        let (x, y) = t.apply(1.5, -4.0);
        assert!(close(inv.apply(x, y), (1.5, -4.0)));
    }

    #[test]
    fn singular_transform_has_no_inverse() {
        assert!(Transform::scaling(0.0, 1.0).invert().is_none());
    }
}
