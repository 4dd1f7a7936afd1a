//! Triangle and extent types.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions, in file order.
///
/// Winding is kept exactly as read; it decides the sign of
/// [`signed_volume`](Self::signed_volume).
///
/// # Example
///
/// ```
/// use mesh_stl::{Triangle, Vector3};
///
/// let tri = Triangle::new(
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
///     Vector3::new(0.0, 0.0, 1.0),
/// );
///
/// // Tetrahedron spanned with the origin
/// assert!((tri.signed_volume() - 1.0 / 6.0).abs() < 1e-12);
/// assert!((tri.reversed().signed_volume() + 1.0 / 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub vertex1: Vector3<f32>,
    /// Second vertex.
    pub vertex2: Vector3<f32>,
    /// Third vertex.
    pub vertex3: Vector3<f32>,
}

impl Triangle {
    /// Create a triangle from three vertices.
    #[inline]
    #[must_use]
    pub const fn new(
        vertex1: Vector3<f32>,
        vertex2: Vector3<f32>,
        vertex3: Vector3<f32>,
    ) -> Self {
        Self {
            vertex1,
            vertex2,
            vertex3,
        }
    }

    /// The vertices in order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Vector3<f32>; 3] {
        [self.vertex1, self.vertex2, self.vertex3]
    }

    /// The same triangle with opposite winding.
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.vertex1, self.vertex3, self.vertex2)
    }

    /// Signed volume of the tetrahedron formed by the origin and this
    /// triangle.
    ///
    /// Evaluated in `f64` as the six-term expansion of the scalar triple
    /// product `v1 · (v2 × v3)`, divided by 6. Positive for CCW winding seen
    /// from the side facing away from the origin.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let [x1, y1, z1] = widen(&self.vertex1);
        let [x2, y2, z2] = widen(&self.vertex2);
        let [x3, y3, z3] = widen(&self.vertex3);

        let v321 = x3 * y2 * z1;
        let v231 = x2 * y3 * z1;
        let v312 = x3 * y1 * z2;
        let v132 = x1 * y3 * z2;
        let v213 = x2 * y1 * z3;
        let v123 = x1 * y2 * z3;

        (1.0 / 6.0) * (-v321 + v231 + v312 - v132 - v213 + v123)
    }
}

fn widen(v: &Vector3<f32>) -> [f64; 3] {
    [f64::from(v.x), f64::from(v.y), f64::from(v.z)]
}

/// Positive and negative side extents along each axis.
///
/// Both sides start at zero. A non-negative coordinate can only raise the
/// positive side, a negative one can only lower the negative side, so a mesh
/// that never crosses an axis' origin reports zero on the side it does not
/// reach.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extents {
    /// Largest non-negative X seen.
    pub x_pos: f32,
    /// Smallest negative X seen.
    pub x_neg: f32,
    /// Largest non-negative Y seen.
    pub y_pos: f32,
    /// Smallest negative Y seen.
    pub y_neg: f32,
    /// Largest non-negative Z seen.
    pub z_pos: f32,
    /// Smallest negative Z seen.
    pub z_neg: f32,
}

impl Extents {
    /// Fold one vertex into the extents.
    ///
    /// NaN components fall on the negative branch and never win the
    /// comparison, so they leave the extents unchanged.
    pub fn include(&mut self, v: &Vector3<f32>) {
        widen_side(v.x, &mut self.x_pos, &mut self.x_neg);
        widen_side(v.y, &mut self.y_pos, &mut self.y_neg);
        widen_side(v.z, &mut self.z_pos, &mut self.z_neg);
    }

    /// `x_pos - x_neg`.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x_pos - self.x_neg
    }

    /// `y_pos - y_neg`.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y_pos - self.y_neg
    }

    /// `z_pos - z_neg`.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.z_pos - self.z_neg
    }
}

fn widen_side(c: f32, pos: &mut f32, neg: &mut f32) {
    if c >= 0.0 {
        if c > *pos {
            *pos = c;
        }
    } else if c < *neg {
        *neg = c;
    }
}
