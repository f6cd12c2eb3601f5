use crate::formats::coordinates::CoordinateIndices;
use crate::formats::pointxyz::PointXyz;
use crate::formats::record::{read_f32_record, RecordRead};
use crate::formats::PointCloud;
use crate::ply::data_types::{PlyEncoding, PlyHeader, TRACKED_PROPERTY_TYPES};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::{debug, trace, warn};

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

type Result<T> = std::result::Result<T, PlyReadError>;

const MAX_PREALLOCATED_POINTS: usize = 1 << 20;

/// Reads the vertex coordinates of a .ply file given its path
pub fn read_ply_file<P: AsRef<Path>>(p: P) -> Result<PointCloud<PointXyz<f64>>> {
    let file = File::open(p).map_err(PlyReadError::IOError)?;
    let reader = BufReader::new(file);
    Parser::new(reader).parse()
}

/// Reads [PlyHeader] directly from a file given the path
pub fn read_ply_header<P: AsRef<Path>>(p: P) -> Result<PlyHeader> {
    let file = File::open(p).map_err(PlyReadError::IOError)?;
    let reader = BufReader::new(file);
    Parser::new(reader).parse_header()
}

/// Parses the vertex coordinates of a PLY stream from the reader
pub fn read_ply<R: Read>(r: R) -> Result<PointCloud<PointXyz<f64>>> {
    let reader = BufReader::new(r);
    Parser::new(reader).parse()
}

#[derive(Error, Debug)]
pub enum PlyReadError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Invalid header while parsing {section:?}. {error_msg:?}\n\t{actual_line:?}")]
    InvalidHeader {
        section: String,
        error_msg: String,
        actual_line: String,
    },
    /// The `format` line names an encoding other than ascii,
    /// binary_little_endian or binary_big_endian.
    #[error("Unsupported PLY format: {0}")]
    UnsupportedFormat(String),
    /// No float or double property called x, y or z.
    #[error("PLY file must contain x, y, z coordinates, missing {}", .missing.join(", "))]
    MissingCoordinateFields { missing: Vec<&'static str> },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

struct Parser<R: BufRead> {
    reader: R,
    line: String,
}

impl<R: BufRead> Parser<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    fn parse(mut self) -> Result<PointCloud<PointXyz<f64>>> {
        let header = self.parse_header()?;
        match header.encoding() {
            PlyEncoding::Ascii => self.parse_ascii_data(&header),
            PlyEncoding::BinaryLittleEndian => self.parse_binary_data::<LittleEndian>(&header),
            PlyEncoding::BinaryBigEndian => self.parse_binary_data::<BigEndian>(&header),
        }
    }

    /// Consumes lines up to and including `end_header`. Coordinates are
    /// resolved before the encoding is checked, and both before any vertex is
    /// read.
    fn parse_header(&mut self) -> Result<PlyHeader> {
        let mut format = "ascii".to_string();
        let mut vertex_count = 0;
        let mut properties = Vec::new();
        let mut data_offset = 0;

        loop {
            self.line.clear();
            let consumed = self
                .reader
                .read_line(&mut self.line)
                .map_err(PlyReadError::IOError)?;
            if consumed == 0 {
                return Err(self.header_err("end_header", "Reached end of file".to_string()));
            }
            data_offset += consumed as u64;

            let line = self.line.trim();
            if line == "end_header" {
                break;
            }

            let tokens = line.split_whitespace().collect::<Vec<&str>>();
            match tokens.as_slice() {
                ["element", "vertex", .., count] => {
                    vertex_count = count.parse::<u64>().map_err(|e| {
                        self.header_err("element vertex", e.to_string())
                    })?;
                }
                ["format", name, ..] => format = name.to_string(),
                ["property", data_type, .., name] if TRACKED_PROPERTY_TYPES.contains(data_type) => {
                    properties.push(name.to_string())
                }
                _ => trace!("skipping ply header line {:?}", line),
            }
        }

        let coordinates = CoordinateIndices::resolve(&properties)
            .map_err(|missing| PlyReadError::MissingCoordinateFields { missing })?;
        let encoding = format
            .parse::<PlyEncoding>()
            .map_err(|_| PlyReadError::UnsupportedFormat(format))?;

        debug!(
            "ply header: {} vertices, properties {:?}, {}",
            vertex_count, properties, encoding
        );
        Ok(PlyHeader {
            encoding,
            vertex_count,
            properties,
            coordinates,
            data_offset,
        })
    }

    /// One line per vertex. Lines with fewer tokens than tracked properties,
    /// including the empty lines past the end of a short file, are skipped.
    fn parse_ascii_data(mut self, header: &PlyHeader) -> Result<PointCloud<PointXyz<f64>>> {
        let declared = header.vertex_count() as usize;
        let width = header.properties().len();
        let indices = header.coordinate_indices();

        let mut points = Vec::with_capacity(declared.min(MAX_PREALLOCATED_POINTS));
        for _ in 0..declared {
            self.line.clear();
            let consumed = self
                .reader
                .read_line(&mut self.line)
                .map_err(PlyReadError::IOError)?;
            if consumed == 0 {
                warn!(
                    "ply payload ended after {} of {} vertices",
                    points.len(),
                    declared
                );
                break;
            }

            let tokens = self.line.split_whitespace().collect::<Vec<&str>>();
            if tokens.len() < width {
                trace!("skipping ply vertex line {:?}", self.line);
                continue;
            }
            if let Some(point) = indices.select(&tokens) {
                points.push(PointXyz::new(
                    parse_coordinate(point.x)?,
                    parse_coordinate(point.y)?,
                    parse_coordinate(point.z)?,
                ));
            }
        }

        Ok(PointCloud::from_points(points).with_declared_points(declared))
    }

    /// One 4-byte float per tracked property and vertex, in byte order `B`.
    /// Decoding stops at the first vertex that cannot be read in full.
    fn parse_binary_data<B: ByteOrder>(
        mut self,
        header: &PlyHeader,
    ) -> Result<PointCloud<PointXyz<f64>>> {
        let declared = header.vertex_count() as usize;
        let width = header.properties().len();
        let indices = header.coordinate_indices();

        let mut points = Vec::with_capacity(declared.min(MAX_PREALLOCATED_POINTS));
        let mut record = Vec::with_capacity(width);
        for _ in 0..declared {
            let outcome = read_f32_record::<B, _>(&mut self.reader, width, &mut record);
            if let RecordRead::Truncated { values_read, .. } = outcome {
                warn!(
                    "ply payload ended inside vertex {} ({} of {} values, {}): keeping {} of {} declared vertices",
                    points.len(),
                    values_read,
                    width,
                    if outcome.is_end_of_data() { "end of data" } else { "read error" },
                    points.len(),
                    declared,
                );
                break;
            }
            if let Some(point) = indices.select(&record) {
                points.push(PointXyz::<f64>::from(point));
            }
        }

        Ok(PointCloud::from_points(points).with_declared_points(declared))
    }

    fn header_err(&self, section: &str, error_msg: String) -> PlyReadError {
        PlyReadError::InvalidHeader {
            section: section.to_string(),
            error_msg,
            actual_line: self.line.clone(),
        }
    }
}

fn parse_coordinate(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|e| PlyReadError::InvalidData(format!("{e}: {token:?}")))
}

#[cfg(test)]
mod tests {
    use crate::formats::pointxyz::PointXyz;
    use crate::ply::{read_ply, read_ply_file, read_ply_header, PlyEncoding, PlyReadError};
    use ply_rs::ply::{
        Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
        ScalarType,
    };
    use ply_rs::writer::Writer;

    const VERTICES: [[f32; 3]; 3] = [[1.0, 2.0, 3.0], [-0.5, 0.25, 1e3], [7.125, -8.0, 0.0]];

    /// Encodes [VERTICES] with a float `intensity` property in front of the
    /// coordinates and, if asked, a uchar `red` property after them.
    fn ply_bytes(encoding: Encoding, with_color: bool) -> Vec<u8> {
        let mut ply = Ply::<DefaultElement>::new();
        ply.header.encoding = encoding;

        let mut vertex = ElementDef::new("vertex".to_string());
        for name in ["intensity", "x", "y", "z"] {
            vertex.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::Float),
            ));
        }
        if with_color {
            vertex.properties.add(PropertyDef::new(
                "red".to_string(),
                PropertyType::Scalar(ScalarType::UChar),
            ));
        }
        ply.header.elements.add(vertex);

        let mut points = Vec::new();
        for (i, [x, y, z]) in VERTICES.iter().enumerate() {
            let mut point = DefaultElement::new();
            point.insert("intensity".to_string(), Property::Float(i as f32));
            point.insert("x".to_string(), Property::Float(*x));
            point.insert("y".to_string(), Property::Float(*y));
            point.insert("z".to_string(), Property::Float(*z));
            if with_color {
                point.insert("red".to_string(), Property::UChar(200));
            }
            points.push(point);
        }
        ply.payload.insert("vertex".to_string(), points);
        ply.make_consistent().unwrap();

        let mut buf = Vec::<u8>::new();
        Writer::new().write_ply(&mut buf, &mut ply).unwrap();
        buf
    }

    fn expected() -> Vec<PointXyz<f64>> {
        VERTICES
            .iter()
            .map(|[x, y, z]| PointXyz::new(*x as f64, *y as f64, *z as f64))
            .collect()
    }

    #[test]
    fn ascii_resolves_properties_by_name() {
        let pc = read_ply(ply_bytes(Encoding::Ascii, false).as_slice()).unwrap();
        assert_eq!(pc.points, expected());
        assert!(!pc.is_truncated());
    }

    #[test]
    fn binary_endianness_is_equivalent() {
        let le = read_ply(ply_bytes(Encoding::BinaryLittleEndian, false).as_slice()).unwrap();
        let be = read_ply(ply_bytes(Encoding::BinaryBigEndian, false).as_slice()).unwrap();
        assert_eq!(le.points, expected());
        assert_eq!(le.points, be.points);
    }

    #[test]
    fn ascii_ignores_trailing_untracked_properties() {
        let pc = read_ply(ply_bytes(Encoding::Ascii, true).as_slice()).unwrap();
        assert_eq!(pc.points, expected());
    }

    #[test]
    fn binary_untracked_properties_shift_later_vertices() {
        // The one-byte `red` property is not part of the stride, so only the
        // first vertex lines up.
        let pc = read_ply(ply_bytes(Encoding::BinaryLittleEndian, true).as_slice()).unwrap();
        assert_eq!(pc.points[0], expected()[0]);
        assert_ne!(pc.points[1], expected()[1]);
    }

    #[test]
    fn missing_z_is_rejected_before_payload() {
        let ply = "ply\n\
                   format ascii 1.0\n\
                   element vertex 1\n\
                   property float x\n\
                   property float y\n\
                   property uchar z\n\
                   end_header\n\
                   not even numbers\n";
        match read_ply(ply.as_bytes()) {
            Err(PlyReadError::MissingCoordinateFields { missing }) => {
                assert_eq!(missing, vec!["z"])
            }
            other => panic!("expected missing coordinates, got {other:?}"),
        }
    }

    #[test]
    fn float64_coordinates_are_tracked() {
        let ply = "ply\n\
                   format ascii 1.0\n\
                   element vertex 2\n\
                   property float64 x\n\
                   property float64 y\n\
                   property float64 z\n\
                   end_header\n\
                   1 2 3\n\
                   -4.5 5 0.25\n";
        let pc = read_ply(ply.as_bytes()).unwrap();
        assert_eq!(
            pc.points,
            vec![PointXyz::new(1.0, 2.0, 3.0), PointXyz::new(-4.5, 5.0, 0.25)]
        );
    }

    #[test]
    fn unsupported_format_is_rejected() {
        let ply = "ply\nformat binary_middle_endian 1.0\nelement vertex 0\n\
                   property float x\nproperty float y\nproperty float z\nend_header\n";
        match read_ply(ply.as_bytes()) {
            Err(PlyReadError::UnsupportedFormat(format)) => {
                assert_eq!(format, "binary_middle_endian")
            }
            other => panic!("expected unsupported format, got {other:?}"),
        }
    }

    #[test]
    fn header_without_end_is_invalid() {
        let ply = "ply\nformat ascii 1.0\nproperty float x\n";
        match read_ply(ply.as_bytes()) {
            Err(PlyReadError::InvalidHeader { section, .. }) => assert_eq!(section, "end_header"),
            other => panic!("expected invalid header, got {other:?}"),
        }
    }

    #[test]
    fn ascii_skips_short_lines_and_stops_at_eof() {
        let ply = "ply\r\n\
                   format ascii 1.0\r\n\
                   element vertex 4\r\n\
                   property double x\r\n\
                   property double y\r\n\
                   property double z\r\n\
                   property list uchar int vertex_indices\r\n\
                   end_header\r\n\
                   1 2 3\r\n\
                   4 5\r\n\
                   6 7 8\r\n";
        let pc = read_ply(ply.as_bytes()).unwrap();
        assert_eq!(
            pc.points,
            vec![PointXyz::new(1.0, 2.0, 3.0), PointXyz::new(6.0, 7.0, 8.0)]
        );
        assert_eq!(pc.declared_points, Some(4));
        assert!(pc.is_truncated());
    }

    #[test]
    fn ascii_rejects_non_numeric_coordinates() {
        let ply = "ply\nformat ascii 1.0\nelement vertex 1\n\
                   property float x\nproperty float y\nproperty float z\nend_header\n\
                   1 two 3\n";
        match read_ply(ply.as_bytes()) {
            Err(PlyReadError::InvalidData(_)) => {}
            other => panic!("expected invalid data, got {other:?}"),
        }
    }

    #[test]
    fn binary_truncation_keeps_complete_vertices() {
        let full = ply_bytes(Encoding::BinaryBigEndian, false);
        let cut = &full[..full.len() - 5];
        let pc = read_ply(cut).unwrap();
        assert_eq!(pc.points, expected()[..2].to_vec());
        assert!(pc.is_truncated());
    }

    #[test]
    fn read_fixture_files() {
        let header = read_ply_header("test_files/ply/binary_big_endian.ply").unwrap();
        assert_eq!(header.encoding(), PlyEncoding::BinaryBigEndian);
        assert_eq!(header.vertex_count(), 4);
        assert_eq!(header.properties(), ["x", "y", "z"]);

        let ascii = read_ply_file("test_files/ply/ascii.ply").unwrap();
        let le = read_ply_file("test_files/ply/binary_little_endian.ply").unwrap();
        let be = read_ply_file("test_files/ply/binary_big_endian.ply").unwrap();
        assert_eq!(ascii.number_of_points, 4);
        assert_eq!(ascii.points, le.points);
        assert_eq!(le.points, be.points);
    }
}
