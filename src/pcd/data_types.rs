use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::formats::coordinates::CoordinateIndices;

/// Header information for the PCD file
///
/// Keywords may appear in any order and any of them may be missing; the
/// reader only insists on a `DATA` line.
#[derive(Debug, Clone, PartialEq)]
pub struct PCDHeader {
    pub(crate) version: String,
    pub(crate) fields: Vec<String>,
    pub(crate) sizes: Vec<u64>,
    pub(crate) types: Vec<PCDFieldType>,
    pub(crate) counts: Vec<u64>,
    pub(crate) width: u64,
    pub(crate) height: u64,
    pub(crate) viewpoint: Vec<f64>,
    pub(crate) points: u64,
    pub(crate) data_type: PCDDataType,
    pub(crate) data_offset: u64,
}

impl PCDHeader {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn types(&self) -> &[PCDFieldType] {
        &self.types
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn viewpoint(&self) -> &[f64] {
        &self.viewpoint
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn data_type(&self) -> PCDDataType {
        self.data_type
    }

    /// Byte offset of the first payload byte, i.e. the length of every header
    /// line including its terminator.
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Where x, y and z sit in a binary record. Missing names fall back to
    /// positions 0, 1 and 2.
    pub fn coordinate_indices(&self) -> CoordinateIndices {
        CoordinateIndices::resolve_or_positional(&self.fields)
    }
}

/// The type of the dimension of the field
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PCDFieldType {
    Signed,
    Unsigned,
    Float,
}

impl Display for PCDFieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Signed => "I",
            Self::Unsigned => "U",
            Self::Float => "F",
        };
        f.write_str(s)
    }
}

impl FromStr for PCDFieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::Signed),
            "U" => Ok(Self::Unsigned),
            "F" => Ok(Self::Float),
            _ => Err(format!("Unknown field type {s}")),
        }
    }
}

/// The storage format of the point cloud data file
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PCDDataType {
    Ascii,
    Binary,
}

impl Display for PCDDataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ascii => "ascii",
            Self::Binary => "binary",
        };
        f.write_str(s)
    }
}

impl FromStr for PCDDataType {
    type Err = String;

    /// Case-insensitive. `binary_compressed` is not supported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "binary" => Ok(Self::Binary),
            _ => Err(format!("Unsupported PCD data format: {s}")),
        }
    }
}
