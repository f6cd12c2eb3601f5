//! Readers for PCD, PLY and KITTI-style velodyne bin point clouds, and an
//! ascii PCD writer.
//!
//! ```no_run
//! use cloudio::PointCloudIo;
//!
//! fn main() -> Result<(), cloudio::io::ReadError> {
//!     let io = PointCloudIo::new();
//!     let src = io.read("scan.bin")?.remove_non_finite();
//!     let tgt = io.read("map.pcd")?.remove_non_finite();
//!     println!("{} / {} points", src.number_of_points, tgt.number_of_points);
//!     Ok(())
//! }
//! ```

pub mod formats;
pub mod io;
pub mod pcd;
pub mod ply;
pub mod velodyne;

pub use formats::{coordinates::CoordinateIndices, pointxyz::PointXyz, PointCloud};
pub use io::{read_point_cloud, CloudFormat, PointCloudIo};
