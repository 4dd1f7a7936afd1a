//! End-to-end tests reading binary STL files from disk.
//!
//! Fixtures are generated into temporary directories so the tests do not
//! depend on checked-in model files.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use mesh_stl::{
    read_stl_summary, read_stl_summary_with, CountByteOrder, ErrorKind, ReadParams, StlError,
    StlReader, Vector3,
};
use tempfile::tempdir;

type Tri = [[f32; 3]; 3];

/// Unit cube corners, offset by `origin`.
fn cube_corners(origin: f32) -> [[f32; 3]; 8] {
    let (a, b) = (origin, origin + 1.0);
    [
        [a, a, a],
        [b, a, a],
        [b, b, a],
        [a, b, a],
        [a, a, b],
        [b, a, b],
        [b, b, b],
        [a, b, b],
    ]
}

/// Closed cube with CCW winding seen from outside.
fn cube(origin: f32) -> Vec<Tri> {
    const FACES: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    let corners = cube_corners(origin);
    FACES
        .iter()
        .map(|&[i, j, k]| [corners[i], corners[j], corners[k]])
        .collect()
}

fn stl_bytes(tris: &[Tri], declared: i32, count_bytes: fn(i32) -> [u8; 4]) -> Vec<u8> {
    let mut bytes = vec![0u8; 80];
    bytes[..14].copy_from_slice(b"mesh-stl tests");
    bytes.extend_from_slice(&count_bytes(declared));
    for tri in tris {
        for c in [0.0f32; 3] {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
        for v in tri {
            for c in v {
                bytes.extend_from_slice(&c.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&0i16.to_le_bytes());
    }
    bytes
}

fn write_stl(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

fn native_count(tris: &[Tri]) -> Vec<u8> {
    stl_bytes(tris, i32::try_from(tris.len()).unwrap(), i32::to_ne_bytes)
}

#[test]
fn centered_unit_cube() {
    let dir = tempdir().unwrap();
    let tris = cube(-0.5);
    let path = write_stl(dir.path(), "cube.stl", &native_count(&tris));

    let reader = StlReader::open(&path);
    assert!(!reader.is_failed(), "{:?}", reader.error());
    assert_eq!(reader.triangle_count(), 12);
    assert_eq!(reader.normals().len(), 12);
    assert_eq!(reader.triangles().len(), 12);
    assert_eq!(reader.attribute_byte_counts().len(), 12);
    assert_eq!(reader.vertices().len(), 36);

    assert_relative_eq!(reader.volume(), 1.0, epsilon = 1e-5);
    assert_eq!(reader.dimensions(), (1.0, 1.0, 1.0));
    assert_eq!(reader.width(), 1.0);
    assert_eq!(reader.height(), 1.0);
    assert_eq!(reader.depth(), 1.0);

    let c = reader.centroid();
    for axis in 0..3 {
        assert!(c[axis].abs() <= 0.5, "centroid {c:?} outside the cube");
    }
}

#[test]
fn reversed_winding_negates_volume() {
    let dir = tempdir().unwrap();
    let tris = cube(-0.5);
    let reversed: Vec<Tri> = tris.iter().map(|&[a, b, c]| [a, c, b]).collect();

    let forward = read_stl_summary(write_stl(dir.path(), "a.stl", &native_count(&tris))).unwrap();
    let backward =
        read_stl_summary(write_stl(dir.path(), "b.stl", &native_count(&reversed))).unwrap();

    assert_relative_eq!(backward.volume(), -forward.volume(), epsilon = 1e-9);
    assert_relative_eq!(backward.volume(), -1.0, epsilon = 1e-5);
}

#[test]
fn volume_is_translation_invariant_for_closed_mesh() {
    let dir = tempdir().unwrap();
    let tris = cube(3.0);
    let summary = read_stl_summary(write_stl(dir.path(), "far.stl", &native_count(&tris))).unwrap();

    assert_relative_eq!(summary.volume(), 1.0, epsilon = 1e-4);
}

#[test]
fn offset_cube_keeps_zero_anchored_extents() {
    let dir = tempdir().unwrap();
    let tris = cube(2.0);
    let summary =
        read_stl_summary(write_stl(dir.path(), "offset.stl", &native_count(&tris))).unwrap();

    // Spans 2..3 on each axis, but extents are measured from the origin
    assert_eq!(summary.extents().x_neg, 0.0);
    assert_eq!(summary.extents().x_pos, 3.0);
    assert_eq!(summary.dimensions(), (3.0, 3.0, 3.0));
}

#[test]
fn empty_mesh_file() {
    let dir = tempdir().unwrap();
    let bytes = native_count(&[]);
    assert_eq!(bytes.len(), 84);
    let path = write_stl(dir.path(), "empty.stl", &bytes);

    let reader = StlReader::open(&path);
    assert!(!reader.is_failed());
    assert_eq!(reader.triangle_count(), 0);
    assert_eq!(reader.volume(), 0.0);
    assert_eq!(reader.dimensions(), (0.0, 0.0, 0.0));
    assert_eq!(reader.centroid(), Vector3::zeros());
    assert!(reader.normals().is_empty());
    assert!(reader.vertices().is_empty());
    assert!(reader.triangles().is_empty());
    assert!(reader.attribute_byte_counts().is_empty());
}

#[test]
fn truncated_file() {
    let dir = tempdir().unwrap();
    let tris = cube(-0.5);
    let mut bytes = stl_bytes(&tris[..5], 12, i32::to_ne_bytes);
    bytes.extend_from_slice(&[0u8; 30]);
    let path = write_stl(dir.path(), "cut.stl", &bytes);

    let reader = StlReader::open(&path);
    assert!(reader.is_failed());
    assert_eq!(reader.error_kind(), Some(ErrorKind::TruncatedData));
    assert_eq!(reader.triangle_count(), 12);
    assert_eq!(reader.triangles().len(), 5);
    assert_eq!(reader.normals().len(), 5);
    assert_eq!(reader.vertices().len(), 15);

    match read_stl_summary(&path) {
        Err(StlError::TruncatedData { triangles_read, .. }) => assert_eq!(triangles_read, 5),
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn wrong_extension_is_rejected_before_opening() {
    let dir = tempdir().unwrap();
    let path = write_stl(dir.path(), "cube.obj", &native_count(&cube(-0.5)));

    let reader = StlReader::open(&path);
    assert!(reader.is_failed());
    assert_eq!(reader.error_kind(), Some(ErrorKind::InvalidExtension));
    assert_eq!(reader.error_kind().map(ErrorKind::code), Some(1));
    assert!(reader.summary().is_empty());
}

#[test]
fn uppercase_extension_is_accepted() {
    let dir = tempdir().unwrap();
    let path = write_stl(dir.path(), "CUBE.STL", &native_count(&cube(-0.5)));

    let reader = StlReader::open(&path);
    assert!(!reader.is_failed());
    assert_eq!(reader.triangles().len(), 12);
}

#[test]
fn missing_file() {
    let dir = tempdir().unwrap();
    let result = read_stl_summary(dir.path().join("absent.stl"));

    match result {
        Err(StlError::OpenFailed { path, .. }) => {
            assert!(path.to_string_lossy().contains("absent"));
        }
        other => panic!("expected open failure, got {other:?}"),
    }
}

#[test]
fn portable_params_read_little_endian_count_and_payload() {
    let dir = tempdir().unwrap();
    let tris = cube(-0.5);

    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&12i32.to_le_bytes());
    for (i, tri) in tris.iter().enumerate() {
        for c in [0.0f32; 3] {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
        for v in tri {
            for c in v {
                bytes.extend_from_slice(&c.to_le_bytes());
            }
        }
        // Every other triangle carries a two-byte colour payload
        if i % 2 == 0 {
            bytes.extend_from_slice(&2i16.to_le_bytes());
            bytes.extend_from_slice(&[0x1F, 0x7C]);
        } else {
            bytes.extend_from_slice(&0i16.to_le_bytes());
        }
    }
    let path = write_stl(dir.path(), "colour.stl", &bytes);

    let summary = read_stl_summary_with(&path, &ReadParams::portable()).unwrap();
    assert_eq!(summary.triangles_read(), 12);
    assert_eq!(summary.attribute_byte_counts()[0], 2);
    assert_eq!(summary.attribute_byte_counts()[1], 0);
    assert_relative_eq!(summary.volume(), 1.0, epsilon = 1e-5);

    let params = ReadParams::default().with_count_byte_order(CountByteOrder::Little);
    let legacy = StlReader::open_with(&path, &params);

    // Without skipping, every record after the first payload is shifted
    assert!(!legacy.is_failed());
    assert_eq!(legacy.triangles()[0], summary.triangles()[0]);
    assert_ne!(legacy.triangles()[1], summary.triangles()[1]);
}

#[test]
fn oversized_declared_count_in_small_file() {
    let dir = tempdir().unwrap();
    let tris = cube(-0.5);
    let bytes = stl_bytes(&tris[..2], i32::MAX, i32::to_ne_bytes);
    let path = write_stl(dir.path(), "liar.stl", &bytes);

    let reader = StlReader::open(&path);
    assert_eq!(reader.error_kind(), Some(ErrorKind::TruncatedData));
    assert_eq!(reader.triangle_count(), i32::MAX);
    assert_eq!(reader.triangles().len(), 2);
    assert_eq!(reader.vertices().len(), 6);
}
