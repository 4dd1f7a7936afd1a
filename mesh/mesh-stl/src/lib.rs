//! Binary STL summaries for CortenForge.
//!
//! This crate decodes a binary STL in a single pass and derives geometric
//! statistics along the way:
//!
//! - **Normals, vertices, triangles** and attribute byte counts, in file order
//! - **Signed volume** by summing origin tetrahedra (divergence theorem)
//! - **Width / height / depth** from per-axis positive and negative extents
//! - **Centroid** as a running pairwise average of vertices
//!
//! It is not a mesh-processing library: there is no ASCII STL, no writing,
//! no repair, and nothing is recomputed after the pass.
//!
//! # Example
//!
//! ```no_run
//! use mesh_stl::{read_stl_summary, StlReader};
//!
//! // Result-returning factory
//! let summary = read_stl_summary("model.stl").unwrap();
//! println!("volume: {}", summary.volume());
//!
//! // Eager reader that records failure instead of returning it
//! let reader = StlReader::open("model.stl");
//! if !reader.is_failed() {
//!     let (w, h, d) = reader.dimensions();
//!     println!("{w} x {h} x {d}");
//! }
//! ```
//!
//! # Byte Order
//!
//! The triangle count after the header is read in native byte order by
//! default, while every per-triangle field is little-endian. Use
//! [`ReadParams::portable`] to read the count as little-endian and skip
//! attribute payloads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cursor;
mod error;
mod params;
mod reader;
mod summary;
mod types;

pub use error::{ErrorKind, StlError, StlResult};
pub use params::{CountByteOrder, ReadParams};
pub use reader::{
    has_stl_extension, read_stl_summary, read_stl_summary_with, StlReader, HEADER_SIZE,
    TRIANGLE_SIZE,
};
pub use summary::MeshSummary;
pub use types::{Extents, Triangle};

// Re-export nalgebra types for convenience
pub use nalgebra::Vector3;
