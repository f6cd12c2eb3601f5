use crate::formats::pointxyz::PointXyz;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

type IOResult = Result<(), std::io::Error>;

/// Writes the points into the file as ascii PCD
pub fn write_pcd_file<P, S>(points: &[PointXyz<S>], p: P) -> IOResult
where
    P: AsRef<Path>,
    S: Into<f64> + Copy,
{
    let file = File::create(p)?;
    let writer = BufWriter::new(file);
    Writer::new(points, writer).write()
}

/// Writes the points into the provided writer as ascii PCD
pub fn write_pcd<W, S>(points: &[PointXyz<S>], writer: &mut W) -> IOResult
where
    W: Write,
    S: Into<f64> + Copy,
{
    Writer::new(points, writer).write()
}

struct Writer<'a, W: Write, S> {
    writer: W,
    points: &'a [PointXyz<S>],
}

impl<'a, W, S> Writer<'a, W, S>
where
    W: Write,
    S: Into<f64> + Copy,
{
    fn new(points: &'a [PointXyz<S>], writer: W) -> Self {
        Self { writer, points }
    }

    fn write(mut self) -> IOResult {
        self.write_header()?;
        self.write_ascii()?;
        self.writer.flush()
    }

    fn write_header(&mut self) -> IOResult {
        let n = self.points.len();
        let header_str = format!(
            "# .PCD v0.7 - Point Cloud Data file format\n\
            VERSION 0.7\n\
            FIELDS x y z\n\
            SIZE 4 4 4\n\
            TYPE F F F\n\
            COUNT 1 1 1\n\
            WIDTH {n}\n\
            HEIGHT 1\n\
            VIEWPOINT 0 0 0 1 0 0 0\n\
            POINTS {n}\n\
            DATA ascii\n"
        );
        self.writer.write_all(header_str.as_bytes())
    }

    fn write_ascii(&mut self) -> IOResult {
        for point in self.points {
            let (x, y, z): (f64, f64, f64) = (point.x.into(), point.y.into(), point.z.into());
            writeln!(self.writer, "{x:.6} {y:.6} {z:.6}")?;
        }
        Ok(())
    }
}
