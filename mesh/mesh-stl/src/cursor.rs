//! Typed binary cursor over a seekable byte source.
//!
//! Every read decodes one fixed-width field with an explicit byte order and
//! advances a tracked offset, so a short read can be reported with the exact
//! position where the data ran out.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, NativeEndian, ReadBytesExt};
use nalgebra::Vector3;

use crate::error::{StlError, StlResult};
use crate::params::CountByteOrder;

/// Position-tracking reader for the binary STL layout.
#[derive(Debug)]
pub struct BinaryCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read + Seek> BinaryCursor<R> {
    /// Wrap a source. The source is assumed to start at the STL header.
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Current byte offset from the start of the source.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Move to an absolute offset without reading.
    ///
    /// Seeking past the end is not an error; the next read reports the
    /// truncation.
    pub fn seek_to(&mut self, offset: u64) -> StlResult<()> {
        self.position = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Bytes left between the current offset and the end of the source.
    ///
    /// Leaves the offset unchanged.
    pub fn remaining(&mut self) -> StlResult<u64> {
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(self.position))?;
        Ok(end.saturating_sub(self.position))
    }

    /// Read the 4-byte signed triangle count in the requested byte order.
    pub fn read_count(&mut self, order: CountByteOrder) -> StlResult<i32> {
        let start = self.position;
        let value = match order {
            CountByteOrder::Native => self.inner.read_i32::<NativeEndian>(),
            CountByteOrder::Little => self.inner.read_i32::<LittleEndian>(),
        }
        .map_err(|e| short_read(e, start, 4))?;
        self.position += 4;
        Ok(value)
    }

    /// Read three little-endian `f32` values.
    pub fn read_vector(&mut self) -> StlResult<Vector3<f32>> {
        let start = self.position;
        let mut coords = [0.0f32; 3];
        self.inner
            .read_f32_into::<LittleEndian>(&mut coords)
            .map_err(|e| short_read(e, start, 12))?;
        self.position += 12;
        Ok(Vector3::new(coords[0], coords[1], coords[2]))
    }

    /// Read the little-endian signed 16-bit attribute byte count.
    pub fn read_attribute_count(&mut self) -> StlResult<i16> {
        let start = self.position;
        let value = self
            .inner
            .read_i16::<LittleEndian>()
            .map_err(|e| short_read(e, start, 2))?;
        self.position += 2;
        Ok(value)
    }

    /// Consume and discard exactly `len` bytes.
    pub fn skip(&mut self, len: u64) -> StlResult<()> {
        let start = self.position;
        let copied = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())?;
        self.position += copied;
        if copied < len {
            return Err(StlError::TruncatedData {
                position: start,
                needed: usize::try_from(len).unwrap_or(usize::MAX),
                triangles_read: 0,
            });
        }
        Ok(())
    }
}

fn short_read(err: io::Error, position: u64, needed: usize) -> StlError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        StlError::TruncatedData {
            position,
            needed,
            triangles_read: 0,
        }
    } else {
        StlError::ReadFailed(err)
    }
}
