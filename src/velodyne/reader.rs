use crate::formats::pointxyz::PointXyz;
use crate::formats::PointCloud;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::velodyne::data_types::{VelodynPoint, VELODYNE_RECORD_SIZE};

type Result<T> = std::result::Result<T, VelodynBinReadError>;

#[derive(Error, Debug)]
pub enum VelodynBinReadError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// The file does not split into whole rows of four floats.
    #[error("Cannot reshape {len} bytes into rows of 4 float32 values")]
    Reshape { len: usize },
}

/// Reads the x, y, z columns of a velodyne bin file given the path.
/// The intensity column is dropped.
pub fn read_velodyn_bin_file<P: AsRef<Path>>(p: P) -> Result<PointCloud<PointXyz<f32>>> {
    let file = File::open(p).map_err(VelodynBinReadError::IOError)?;
    let reader = BufReader::new(file);
    Parser::new(reader).parse()
}

/// Reads the x, y, z columns of velodyne bin data from the reader
pub fn read_velodyn_bin<R: Read>(r: R) -> Result<PointCloud<PointXyz<f32>>> {
    Parser::new(r).parse()
}

struct Parser<R: Read> {
    reader: R,
}

impl<R: Read> Parser<R> {
    fn new(reader: R) -> Self {
        Self { reader }
    }

    fn parse(mut self) -> Result<PointCloud<PointXyz<f32>>> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(VelodynBinReadError::IOError)?;
        if bytes.len() % VELODYNE_RECORD_SIZE != 0 {
            return Err(VelodynBinReadError::Reshape { len: bytes.len() });
        }

        let points = bytes
            .chunks_exact(VELODYNE_RECORD_SIZE)
            .map(|chunk| VelodynPoint::from_bytes(chunk).into())
            .collect::<Vec<PointXyz<f32>>>();
        debug!("velodyne bin: {} points", points.len());
        Ok(PointCloud::from_points(points))
    }
}
