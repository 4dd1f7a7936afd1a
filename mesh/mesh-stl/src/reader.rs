//! Single-pass binary STL reader.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! INT32        – Number of triangles (byte order per ReadParams)
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     INT16     – Attribute byte count
//! end
//! ```
//!
//! All per-triangle fields are little-endian.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use tracing::{debug, info, warn};

use crate::cursor::BinaryCursor;
use crate::error::{ErrorKind, StlError, StlResult};
use crate::params::ReadParams;
use crate::summary::MeshSummary;
use crate::types::Triangle;

/// STL binary header size in bytes.
pub const HEADER_SIZE: u64 = 80;

/// Size of one triangle record without attribute payload.
pub const TRIANGLE_SIZE: u64 = 50;

/// Check for a case-insensitive `.stl` suffix on the whole path string.
///
/// # Example
///
/// ```
/// use mesh_stl::has_stl_extension;
///
/// assert!(has_stl_extension("part.STL"));
/// assert!(!has_stl_extension("part.obj"));
/// ```
#[must_use]
pub fn has_stl_extension<P: AsRef<Path>>(path: P) -> bool {
    let name = path.as_ref().to_string_lossy();
    name.len()
        .checked_sub(4)
        .and_then(|start| name.get(start..))
        .is_some_and(|suffix| suffix.eq_ignore_ascii_case(".stl"))
}

/// A binary STL decoded eagerly at construction.
///
/// Construction never returns an error. A failure is recorded on the reader
/// instead; check [`is_failed`](Self::is_failed) before trusting the
/// accessors. After a truncated read the sequences hold the triangles
/// decoded before the failure and width, height and depth stay zero.
///
/// Use [`read_stl_summary`] for a plain `Result`.
///
/// # Example
///
/// ```no_run
/// use mesh_stl::StlReader;
///
/// let reader = StlReader::open("model.stl");
/// if reader.is_failed() {
///     eprintln!("failed: {:?}", reader.error_kind());
/// } else {
///     println!("volume {}", reader.volume());
/// }
/// ```
#[derive(Debug)]
pub struct StlReader {
    path: Option<PathBuf>,
    summary: MeshSummary,
    error: Option<StlError>,
}

impl StlReader {
    /// Open and decode the file at `path` with default parameters.
    #[must_use]
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::open_with(path, &ReadParams::default())
    }

    /// Open and decode the file at `path`.
    #[must_use]
    pub fn open_with<P: AsRef<Path>>(path: P, params: &ReadParams) -> Self {
        let path = path.as_ref();
        let mut summary = MeshSummary::default();
        let error = open_file(path)
            .and_then(|source| decode(source, params, &mut summary))
            .err();

        Self {
            path: Some(path.to_path_buf()),
            summary,
            error,
        }
    }

    /// Decode an already opened source.
    ///
    /// The source must be positioned so that offset 0 is the start of the
    /// header. No extension check is made.
    #[must_use]
    pub fn from_source<R: Read + Seek>(source: R, params: &ReadParams) -> Self {
        let mut summary = MeshSummary::default();
        let error = decode(source, params, &mut summary).err();

        Self {
            path: None,
            summary,
            error,
        }
    }

    /// Path this reader was opened from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether construction failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// The recorded failure.
    #[must_use]
    pub const fn error(&self) -> Option<&StlError> {
        self.error.as_ref()
    }

    /// Kind of the recorded failure.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(StlError::kind)
    }

    /// Accumulated data, partial if the reader failed.
    #[must_use]
    pub const fn summary(&self) -> &MeshSummary {
        &self.summary
    }

    /// Take the accumulated data regardless of failure.
    #[must_use]
    pub fn into_summary(self) -> MeshSummary {
        self.summary
    }

    /// Convert into a `Result`, discarding partial data on failure.
    ///
    /// # Errors
    ///
    /// Returns the recorded error if construction failed.
    pub fn into_result(self) -> StlResult<MeshSummary> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.summary),
        }
    }

    /// See [`MeshSummary::normals`].
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f32>] {
        self.summary.normals()
    }

    /// See [`MeshSummary::vertices`].
    #[must_use]
    pub fn vertices(&self) -> &[Vector3<f32>] {
        self.summary.vertices()
    }

    /// See [`MeshSummary::triangles`].
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        self.summary.triangles()
    }

    /// See [`MeshSummary::attribute_byte_counts`].
    #[must_use]
    pub fn attribute_byte_counts(&self) -> &[i16] {
        self.summary.attribute_byte_counts()
    }

    /// See [`MeshSummary::centroid`].
    #[must_use]
    pub const fn centroid(&self) -> Vector3<f32> {
        self.summary.centroid()
    }

    /// See [`MeshSummary::triangle_count`].
    #[must_use]
    pub const fn triangle_count(&self) -> i32 {
        self.summary.triangle_count()
    }

    /// See [`MeshSummary::volume`].
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.summary.volume()
    }

    /// See [`MeshSummary::width`].
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.summary.width()
    }

    /// See [`MeshSummary::height`].
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.summary.height()
    }

    /// See [`MeshSummary::depth`].
    #[must_use]
    pub const fn depth(&self) -> f32 {
        self.summary.depth()
    }

    /// See [`MeshSummary::dimensions`].
    #[must_use]
    pub const fn dimensions(&self) -> (f32, f32, f32) {
        self.summary.dimensions()
    }
}

/// Read a binary STL into a [`MeshSummary`] with default parameters.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not end in `.stl`
/// - The file cannot be opened
/// - The data ends before the declared number of triangles
///
/// # Example
///
/// ```no_run
/// use mesh_stl::read_stl_summary;
///
/// let summary = read_stl_summary("model.stl").unwrap();
/// println!("{summary}");
/// ```
pub fn read_stl_summary<P: AsRef<Path>>(path: P) -> StlResult<MeshSummary> {
    read_stl_summary_with(path, &ReadParams::default())
}

/// Read a binary STL into a [`MeshSummary`].
///
/// # Errors
///
/// See [`read_stl_summary`].
pub fn read_stl_summary_with<P: AsRef<Path>>(
    path: P,
    params: &ReadParams,
) -> StlResult<MeshSummary> {
    StlReader::open_with(path, params).into_result()
}

fn open_file(path: &Path) -> StlResult<BufReader<File>> {
    if !has_stl_extension(path) {
        warn!(path = %path.display(), "Rejected file without .stl extension");
        return Err(StlError::invalid_extension(path));
    }

    debug!(path = %path.display(), "Opening STL");
    let file = File::open(path).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Failed to open STL");
        StlError::OpenFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(BufReader::new(file))
}

/// Run the decode pass, filling `summary` as triangles are read.
///
/// The source is dropped when this returns, on success or failure.
fn decode<R: Read + Seek>(
    source: R,
    params: &ReadParams,
    summary: &mut MeshSummary,
) -> StlResult<()> {
    let mut cursor = BinaryCursor::new(source);
    cursor.seek_to(HEADER_SIZE)?;

    let declared = cursor
        .read_count(params.count_byte_order)
        .inspect_err(|e| warn!(error = %e, "STL ends before the triangle count"))?;

    let records = usize::try_from(declared).unwrap_or_else(|_| {
        warn!(declared, "Negative triangle count, decoding no triangles");
        0
    });

    // Reserve only what the remaining bytes can hold, not what the count claims
    let remaining = cursor.remaining()?;
    let fit = usize::try_from(remaining / TRIANGLE_SIZE).unwrap_or(usize::MAX);
    *summary = MeshSummary::with_capacity(declared, records.min(fit));
    debug!(
        declared,
        offset = cursor.position(),
        remaining,
        "Read STL triangle count"
    );

    let mut warned_payload = false;
    for index in 0..records {
        let (normal, triangle, attribute) =
            read_record(&mut cursor, params).map_err(|e| {
                let e = e.with_triangles_read(index);
                warn!(
                    error = %e,
                    triangles_read = index,
                    declared,
                    "STL decode aborted"
                );
                e
            })?;

        if attribute != 0 && !params.skip_attribute_payload && !warned_payload {
            warn!(
                triangle = index,
                attribute,
                "Non-zero attribute byte count left unskipped, later records may be misaligned"
            );
            warned_payload = true;
        }

        summary.push_triangle(normal, triangle, attribute);
    }

    summary.finish();
    info!(
        triangles = summary.triangles_read(),
        volume = summary.volume(),
        width = summary.width(),
        height = summary.height(),
        depth = summary.depth(),
        "Decoded STL"
    );

    Ok(())
}

/// Read one record. Nothing is accumulated until all of it has been read.
fn read_record<R: Read + Seek>(
    cursor: &mut BinaryCursor<R>,
    params: &ReadParams,
) -> StlResult<(Vector3<f32>, Triangle, i16)> {
    let normal = cursor.read_vector()?;
    let vertex1 = cursor.read_vector()?;
    let vertex2 = cursor.read_vector()?;
    let vertex3 = cursor.read_vector()?;
    let attribute = cursor.read_attribute_count()?;

    if params.skip_attribute_payload && attribute != 0 {
        // The field is unsigned on disk
        let len = u16::from_le_bytes(attribute.to_le_bytes());
        debug!(len, "Skipping attribute payload");
        cursor.skip(u64::from(len))?;
    }

    Ok((normal, Triangle::new(vertex1, vertex2, vertex3), attribute))
}
