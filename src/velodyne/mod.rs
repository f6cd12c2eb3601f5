//! KITTI-style velodyne bin files
//!
//! A headerless run of little-endian float32 values, four per point
//! (x, y, z, intensity).

mod data_types;
mod reader;

pub use data_types::{VelodynPoint, VELODYNE_RECORD_SIZE};
pub use reader::{read_velodyn_bin, read_velodyn_bin_file, VelodynBinReadError};
