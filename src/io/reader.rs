use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::formats::pointxyz::PointXyz;
use crate::formats::PointCloud;
use crate::pcd::{read_pcd_file, PCDReadError};
use crate::ply::{read_ply_file, PlyReadError};
use crate::velodyne::{read_velodyn_bin_file, VelodynBinReadError};

/// The on-disk formats a point cloud can be read from
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CloudFormat {
    Pcd,
    Ply,
    VelodyneBin,
}

impl CloudFormat {
    /// Picks the format from the file extension. Extensions are matched
    /// exactly, so `.PCD` is not recognised.
    pub fn from_path<P: AsRef<Path>>(p: P) -> Result<Self, ReadError> {
        let p = p.as_ref();
        p.extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ReadError::UnsupportedFormat(p.display().to_string()))?
            .parse::<CloudFormat>()
            .map_err(|_| ReadError::UnsupportedFormat(p.display().to_string()))
    }
}

impl Display for CloudFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pcd => "pcd",
            Self::Ply => "ply",
            Self::VelodyneBin => "bin",
        };
        f.write_str(s)
    }
}

impl FromStr for CloudFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pcd" => Ok(Self::Pcd),
            "ply" => Ok(Self::Ply),
            "bin" => Ok(Self::VelodyneBin),
            _ => Err(format!("Unsupported file format {s}. Use .bin, .pcd, or .ply")),
        }
    }
}

/// Coarse classification of every read failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Unknown extension, PCD `DATA` mode or PLY `format`.
    UnsupportedFormat,
    /// A PLY file without float/double x, y and z properties.
    MissingCoordinateFields,
    /// The file could not be opened or read.
    IOFailure,
    /// Header values or ascii payload that do not parse, or a bin file that is
    /// not made of whole rows.
    InvalidData,
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Unsupported file format for {0}. Use .bin, .pcd, or .ply")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Pcd(#[from] PCDReadError),
    #[error(transparent)]
    Ply(#[from] PlyReadError),
    #[error(transparent)]
    Velodyne(#[from] VelodynBinReadError),
}

impl ReadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Pcd(e) => match e {
                PCDReadError::IOError(_) => ErrorKind::IOFailure,
                PCDReadError::UnsupportedDataType(_) => ErrorKind::UnsupportedFormat,
                PCDReadError::InvalidHeader { .. } | PCDReadError::InvalidData(_) => {
                    ErrorKind::InvalidData
                }
            },
            Self::Ply(e) => match e {
                PlyReadError::IOError(_) => ErrorKind::IOFailure,
                PlyReadError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
                PlyReadError::MissingCoordinateFields { .. } => {
                    ErrorKind::MissingCoordinateFields
                }
                PlyReadError::InvalidHeader { .. } | PlyReadError::InvalidData(_) => {
                    ErrorKind::InvalidData
                }
            },
            Self::Velodyne(e) => match e {
                VelodynBinReadError::IOError(_) => ErrorKind::IOFailure,
                VelodynBinReadError::Reshape { .. } => ErrorKind::InvalidData,
            },
        }
    }
}

/// Reads any supported point cloud file, choosing the reader by extension.
/// Velodyne bin coordinates are widened to f64.
pub fn read_point_cloud<P: AsRef<Path>>(p: P) -> Result<PointCloud<PointXyz<f64>>, ReadError> {
    let p = p.as_ref();
    let format = CloudFormat::from_path(p)?;
    debug!("reading {} as {}", p.display(), format);
    let point_cloud = match format {
        CloudFormat::Pcd => read_pcd_file(p)?,
        CloudFormat::Ply => read_ply_file(p)?,
        CloudFormat::VelodyneBin => read_velodyn_bin_file(p)?.into(),
    };
    Ok(point_cloud)
}
