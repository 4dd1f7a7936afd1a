//! Accumulated geometry of a binary STL decode pass.

use std::fmt;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Extents, Triangle};

/// Everything derived from one pass over a binary STL.
///
/// Sequences are in file order. After a failed pass they hold only the
/// triangles decoded before the failure.
///
/// # Example
///
/// ```
/// use mesh_stl::{MeshSummary, Triangle, Vector3};
///
/// let mut summary = MeshSummary::new(1);
/// summary.push_triangle(
///     Vector3::new(0.0, 0.0, 1.0),
///     Triangle::new(
///         Vector3::new(0.0, 0.0, 0.0),
///         Vector3::new(2.0, 0.0, 0.0),
///         Vector3::new(0.0, 3.0, 0.0),
///     ),
///     0,
/// );
/// summary.finish();
///
/// assert_eq!(summary.vertices().len(), 3);
/// assert_eq!(summary.dimensions(), (2.0, 3.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshSummary {
    normals: Vec<Vector3<f32>>,
    vertices: Vec<Vector3<f32>>,
    triangles: Vec<Triangle>,
    attribute_byte_counts: Vec<i16>,
    extents: Extents,
    triangle_count: i32,
    volume: f64,
    width: f32,
    height: f32,
    depth: f32,
    centroid: Vector3<f32>,
}

impl MeshSummary {
    /// Start an empty summary for a file declaring `triangle_count` records.
    ///
    /// Nothing is reserved; see [`with_capacity`](Self::with_capacity).
    #[must_use]
    pub fn new(triangle_count: i32) -> Self {
        Self::with_capacity(triangle_count, 0)
    }

    /// Start an empty summary with room for `capacity` triangles.
    ///
    /// The declared count comes from untrusted input, so callers should
    /// bound `capacity` by what the source can actually hold.
    #[must_use]
    pub fn with_capacity(triangle_count: i32, capacity: usize) -> Self {
        Self {
            normals: Vec::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity.saturating_mul(3)),
            triangles: Vec::with_capacity(capacity),
            attribute_byte_counts: Vec::with_capacity(capacity),
            triangle_count,
            ..Self::default()
        }
    }

    /// Fold one decoded triangle into the summary.
    ///
    /// Extents and centroid see the vertices in order `vertex1`, `vertex2`,
    /// `vertex3`; the signed tetrahedron volume is added afterwards.
    pub fn push_triangle(
        &mut self,
        normal: Vector3<f32>,
        triangle: Triangle,
        attribute_byte_count: i16,
    ) {
        for vertex in triangle.vertices() {
            self.extents.include(&vertex);
            self.update_centroid(&vertex);
        }

        self.normals.push(normal);
        self.vertices.extend_from_slice(&triangle.vertices());
        self.triangles.push(triangle);
        self.attribute_byte_counts.push(attribute_byte_count);
        self.volume += triangle.signed_volume();
    }

    /// Derive width, height and depth from the extents.
    pub fn finish(&mut self) {
        self.width = self.extents.width();
        self.height = self.extents.height();
        self.depth = self.extents.depth();
    }

    // Running pairwise average: later vertices weigh exponentially more.
    // An exact zero centroid is treated as unset and replaced outright.
    fn update_centroid(&mut self, vertex: &Vector3<f32>) {
        if self.centroid == Vector3::zeros() {
            self.centroid = *vertex;
        } else {
            self.centroid = (self.centroid + vertex) / 2.0;
        }
    }

    /// Normal vectors, one per triangle, as stored in the file.
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    /// Vertices flattened, three per triangle.
    #[must_use]
    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }

    /// Triangles in file order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Attribute byte counts, one per triangle.
    #[must_use]
    pub fn attribute_byte_counts(&self) -> &[i16] {
        &self.attribute_byte_counts
    }

    /// Running centroid estimate.
    #[must_use]
    pub const fn centroid(&self) -> Vector3<f32> {
        self.centroid
    }

    /// Triangle count declared in the file.
    ///
    /// May differ from [`triangles_read`](Self::triangles_read) when the
    /// pass failed or the declared count is negative.
    #[must_use]
    pub const fn triangle_count(&self) -> i32 {
        self.triangle_count
    }

    /// Number of triangles actually decoded.
    #[must_use]
    pub fn triangles_read(&self) -> usize {
        self.triangles.len()
    }

    /// Sum of signed tetrahedron volumes.
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.volume
    }

    /// X span (`x_pos - x_neg`).
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Y span (`y_pos - y_neg`).
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Z span (`z_pos - z_neg`).
    #[must_use]
    pub const fn depth(&self) -> f32 {
        self.depth
    }

    /// `(width, height, depth)`.
    #[must_use]
    pub const fn dimensions(&self) -> (f32, f32, f32) {
        (self.width, self.height, self.depth)
    }

    /// The six raw extents.
    #[must_use]
    pub const fn extents(&self) -> &Extents {
        &self.extents
    }

    #[cfg(test)]
    pub(crate) fn reserved(&self) -> usize {
        self.triangles.capacity()
    }

    /// True when no triangle was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STL: {} triangles, volume {:.6}, size {:.4} x {:.4} x {:.4}",
            self.triangles.len(),
            self.volume,
            self.width,
            self.height,
            self.depth
        )
    }
}
