use byteorder::{ByteOrder, LittleEndian};

use crate::formats::pointxyz::PointXyz;

/// Size in bytes of one row of a velodyne bin file.
pub const VELODYNE_RECORD_SIZE: usize = 16;

/// One row of a velodyne bin file: x, y, z and the reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelodynPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
}

impl VelodynPoint {
    pub fn new(x: f32, y: f32, z: f32, intensity: f32) -> Self {
        Self { x, y, z, intensity }
    }

    /// Decodes one little-endian row. `bytes` must hold exactly one record.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), VELODYNE_RECORD_SIZE);
        let x = LittleEndian::read_f32(&bytes[0..4]);
        let y = LittleEndian::read_f32(&bytes[4..8]);
        let z = LittleEndian::read_f32(&bytes[8..12]);
        let intensity = LittleEndian::read_f32(&bytes[12..16]);
        Self { x, y, z, intensity }
    }
}

impl From<VelodynPoint> for PointXyz<f32> {
    fn from(value: VelodynPoint) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}
