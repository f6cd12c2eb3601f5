//! Format dispatch and the [`PointCloudIo`] entry point.

mod reader;

pub use reader::{read_point_cloud, CloudFormat, ErrorKind, ReadError};

use std::path::Path;

use crate::formats::pointxyz::PointXyz;
use crate::formats::PointCloud;
use crate::pcd::{read_pcd_file, write_pcd_file, PCDReadError};
use crate::ply::{read_ply_file, PlyReadError};
use crate::velodyne::{read_velodyn_bin_file, VelodynBinReadError};

/// The point cloud readers and writer behind one handle.
///
/// Create it once at startup with [`PointCloudIo::new`]. It owns no files or
/// buffers between calls, so it needs no teardown and every call is
/// independent of the others.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointCloudIo;

impl PointCloudIo {
    pub fn new() -> Self {
        Self
    }

    /// Reads any supported file, choosing the reader by extension.
    pub fn read<P: AsRef<Path>>(&self, p: P) -> Result<PointCloud<PointXyz<f64>>, ReadError> {
        read_point_cloud(p)
    }

    pub fn read_pcd<P: AsRef<Path>>(
        &self,
        p: P,
    ) -> Result<PointCloud<PointXyz<f64>>, PCDReadError> {
        read_pcd_file(p)
    }

    pub fn read_ply<P: AsRef<Path>>(
        &self,
        p: P,
    ) -> Result<PointCloud<PointXyz<f64>>, PlyReadError> {
        read_ply_file(p)
    }

    pub fn read_bin<P: AsRef<Path>>(
        &self,
        p: P,
    ) -> Result<PointCloud<PointXyz<f32>>, VelodynBinReadError> {
        read_velodyn_bin_file(p)
    }

    /// Writes the points as ascii PCD.
    pub fn write_pcd<P, S>(&self, points: &[PointXyz<S>], p: P) -> std::io::Result<()>
    where
        P: AsRef<Path>,
        S: Into<f64> + Copy,
    {
        write_pcd_file(points, p)
    }
}

#[cfg(test)]
mod tests {
    use super::PointCloudIo;

    #[test]
    fn converts_bin_to_pcd() {
        let io = PointCloudIo::new();
        let bin = io.read_bin("test_files/velodyne/000001.bin").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("000001.pcd");
        io.write_pcd(&bin.points, &path).unwrap();

        let pcd = io.read_pcd(&path).unwrap();
        let widened = io.read(&path).unwrap();
        assert_eq!(pcd.number_of_points, bin.number_of_points);
        assert_eq!(pcd.points, widened.points);
        for (a, b) in pcd.points.iter().zip(bin.points.iter()) {
            assert!((a.x - b.x as f64).abs() <= 1e-6);
            assert!((a.y - b.y as f64).abs() <= 1e-6);
            assert!((a.z - b.z as f64).abs() <= 1e-6);
        }
    }

    #[test]
    fn reads_ply_through_facade() {
        let io = PointCloudIo::default();
        let ply = io.read_ply("test_files/ply/ascii.ply").unwrap();
        assert_eq!(ply.number_of_points, 4);
    }
}
