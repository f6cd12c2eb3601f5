use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::formats::coordinates::CoordinateIndices;

/// Scalar property types whose values are read from the payload. Every other
/// property (integer scalars, lists) is invisible to the decoder.
pub(crate) const TRACKED_PROPERTY_TYPES: [&str; 4] = ["float", "float32", "float64", "double"];

/// What the reader keeps from a PLY header.
#[derive(Debug, Clone, PartialEq)]
pub struct PlyHeader {
    pub(crate) encoding: PlyEncoding,
    pub(crate) vertex_count: u64,
    pub(crate) properties: Vec<String>,
    pub(crate) coordinates: CoordinateIndices,
    pub(crate) data_offset: u64,
}

impl PlyHeader {
    pub fn encoding(&self) -> PlyEncoding {
        self.encoding
    }

    /// Value of the `element vertex <N>` line, 0 if there is none.
    pub fn vertex_count(&self) -> u64 {
        self.vertex_count
    }

    /// Names of the float and double properties, in declaration order.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn coordinate_indices(&self) -> CoordinateIndices {
        self.coordinates
    }

    /// Byte offset of the first payload byte, just past the `end_header` line.
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }
}

/// Value of the header's `format` line
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlyEncoding {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl Display for PlyEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ascii => "ascii",
            Self::BinaryLittleEndian => "binary_little_endian",
            Self::BinaryBigEndian => "binary_big_endian",
        };
        f.write_str(s)
    }
}

impl FromStr for PlyEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "binary_little_endian" => Ok(Self::BinaryLittleEndian),
            "binary_big_endian" => Ok(Self::BinaryBigEndian),
            _ => Err(format!("Unsupported PLY format: {s}")),
        }
    }
}
