use std::fmt::Debug;

pub mod coordinates;
pub mod pointxyz;
pub mod record;

use pointxyz::PointXyz;

/// Points decoded from a file, in on-disk record order.
#[derive(Clone, PartialEq)]
pub struct PointCloud<T>
where
    T: Clone,
{
    pub number_of_points: usize,
    pub points: Vec<T>,
    /// Number of records announced by the file header, if the format has one
    /// and the decoder honours it.
    pub declared_points: Option<usize>,
}

impl<T> PointCloud<T>
where
    T: Clone,
{
    pub fn new(number_of_points: usize, points: Vec<T>) -> Self {
        Self {
            number_of_points,
            points,
            declared_points: None,
        }
    }

    pub fn from_points(points: Vec<T>) -> Self {
        Self::new(points.len(), points)
    }

    pub fn with_declared_points(mut self, declared_points: usize) -> Self {
        self.declared_points = Some(declared_points);
        self
    }

    /// Whether the payload ended before every declared record was decoded.
    ///
    /// Binary decoders stop at the first short read instead of failing, so a
    /// corrupt capture still yields the points in front of the damage.
    pub fn is_truncated(&self) -> bool {
        self.declared_points
            .map_or(false, |declared| self.number_of_points < declared)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PointCloud<PointXyz<f64>> {
    /// Drops every point with a NaN or infinite coordinate. One bad coordinate
    /// is enough, even when the other two are finite.
    pub fn remove_non_finite(mut self) -> Self {
        self.points.retain(|point| point.is_finite());
        self.number_of_points = self.points.len();
        self
    }
}

impl PointCloud<PointXyz<f32>> {
    pub fn remove_non_finite(mut self) -> Self {
        self.points.retain(|point| point.is_finite());
        self.number_of_points = self.points.len();
        self
    }
}

impl<S> Debug for PointCloud<PointXyz<S>>
where
    S: Clone + Debug,
{
    // first the counts on one line each, then every point on its own line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PointCloud<PointXyz> {{")?;
        writeln!(f, "   number_of_points: {}", self.number_of_points)?;
        if let Some(declared) = self.declared_points {
            writeln!(f, "   declared_points: {}", declared)?;
        }
        for point in &self.points {
            writeln!(f, "   {:?}", point)?;
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl From<PointCloud<PointXyz<f32>>> for PointCloud<PointXyz<f64>> {
    fn from(value: PointCloud<PointXyz<f32>>) -> Self {
        let points = value.points.into_iter().map(PointXyz::from).collect();
        Self {
            number_of_points: value.number_of_points,
            points,
            declared_points: value.declared_points,
        }
    }
}
