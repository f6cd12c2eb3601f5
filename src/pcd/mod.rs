//! Point Cloud Data (PCD)
//!
//! Reads the coordinates out of [.pcd files](https://pcl.readthedocs.io/projects/tutorials/en/master/pcd_file_format.html#pcd-file-format)
//! stored as `ascii` or `binary`, and writes coordinates back as ascii.
//!
//! The two storage modes resolve coordinates differently:
//! * `ascii`: the first three numbers of every non-blank line are x, y and z,
//!   whatever `FIELDS` says.
//! * `binary`: every declared field is read as one little-endian f32 and x, y
//!   and z are looked up by name, falling back to positions 0, 1 and 2.
//!
//! A binary payload that ends early is not an error: the records read before
//! the short read are returned and the cloud reports
//! [`is_truncated`](crate::formats::PointCloud::is_truncated).
//!
//! # Examples
//!
//! ## Reading from a file
//! ```no_run
//! use cloudio::pcd::{PCDReadError, read_pcd_file};
//!
//! fn main() -> Result<(), PCDReadError> {
//!     let pc = read_pcd_file("example.pcd")?;
//!     println!("{}", pc.number_of_points);
//!     Ok(())
//! }
//! ```
//!
//! ## Writing to a file
//! ```no_run
//! use cloudio::pcd::{write_pcd_file, read_pcd_file, PCDReadError};
//!
//! fn main() -> Result<(), PCDReadError> {
//!     let pc = read_pcd_file("example.pcd")?;
//!     write_pcd_file(&pc.points, "new.pcd")?;
//!     Ok(())
//! }
//! ```

mod data_types;
mod reader;
mod writer;

pub use data_types::*;
pub use reader::{read_pcd, read_pcd_file, read_pcd_header, PCDReadError};
pub use writer::{write_pcd, write_pcd_file};
