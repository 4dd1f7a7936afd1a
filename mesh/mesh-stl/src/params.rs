//! Parameters for reading binary STL files.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte order of the 4-byte triangle count that follows the header.
///
/// Per-triangle fields are always little-endian; only the count varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CountByteOrder {
    /// Byte order of the running platform.
    #[default]
    Native,
    /// Little-endian, as written by most STL exporters.
    Little,
}

/// Parameters for a decode pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadParams {
    /// Byte order used for the triangle count. Default: `Native`
    pub count_byte_order: CountByteOrder,

    /// Whether to consume the attribute payload announced by each triangle's
    /// attribute byte count. When false, a non-zero count desynchronizes the
    /// records that follow. Default: false
    pub skip_attribute_payload: bool,
}

impl Default for ReadParams {
    fn default() -> Self {
        Self {
            count_byte_order: CountByteOrder::Native,
            skip_attribute_payload: false,
        }
    }
}

impl ReadParams {
    /// Bit-exact legacy behaviour (same as `Default`).
    #[must_use]
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Little-endian count and attribute payload skipping.
    ///
    /// Reads files from any exporter regardless of host byte order.
    #[must_use]
    pub const fn portable() -> Self {
        Self {
            count_byte_order: CountByteOrder::Little,
            skip_attribute_payload: true,
        }
    }

    /// Set the triangle count byte order.
    #[must_use]
    pub const fn with_count_byte_order(mut self, order: CountByteOrder) -> Self {
        self.count_byte_order = order;
        self
    }

    /// Set attribute payload skipping.
    #[must_use]
    pub const fn with_skip_attribute_payload(mut self, skip: bool) -> Self {
        self.skip_attribute_payload = skip;
        self
    }
}
