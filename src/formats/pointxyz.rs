/// A point carrying only its coordinates.
///
/// `S` is the storage precision of the source format: `f64` for PCD and PLY,
/// `f32` for KITTI-style bin files.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointXyz<S> {
    pub x: S,
    pub y: S,
    pub z: S,
}

impl<S> PointXyz<S> {
    pub fn new(x: S, y: S, z: S) -> Self {
        Self { x, y, z }
    }
}

impl<S: Copy> PointXyz<S> {
    pub fn to_array(&self) -> [S; 3] {
        [self.x, self.y, self.z]
    }
}

impl PointXyz<f32> {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl PointXyz<f64> {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl<S> From<[S; 3]> for PointXyz<S> {
    fn from([x, y, z]: [S; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<PointXyz<f32>> for PointXyz<f64> {
    fn from(value: PointXyz<f32>) -> Self {
        Self {
            x: value.x.into(),
            y: value.y.into(),
            z: value.z.into(),
        }
    }
}
