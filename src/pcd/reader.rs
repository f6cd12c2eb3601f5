use crate::formats::pointxyz::PointXyz;
use crate::formats::record::{read_f32_record, RecordRead};
use crate::formats::PointCloud;
use crate::pcd::data_types::{PCDDataType, PCDFieldType, PCDHeader};
use byteorder::LittleEndian;
use log::{debug, trace, warn};
use std::fmt::Debug;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

type Result<T> = std::result::Result<T, PCDReadError>;

/// Upper bound on the up-front allocation for binary payloads, so a bogus
/// `POINTS` value cannot reserve gigabytes before the first read.
const MAX_PREALLOCATED_POINTS: usize = 1 << 20;

/// Reads the coordinates of a .pcd file given its path
pub fn read_pcd_file<P: AsRef<Path>>(p: P) -> Result<PointCloud<PointXyz<f64>>> {
    let file = File::open(p).map_err(PCDReadError::IOError)?;
    let reader = BufReader::new(file);
    Parser::new(reader).parse()
}

/// Reads [PCDHeader] directly from a file given the path
pub fn read_pcd_header<P: AsRef<Path>>(p: P) -> Result<PCDHeader> {
    let file = File::open(p).map_err(PCDReadError::IOError)?;
    let reader = BufReader::new(file);
    Parser::new(reader).parse_header()
}

/// Parses the coordinates of a PCD stream from the reader
/// ```no_run
/// use cloudio::pcd::{PCDReadError, read_pcd};
///
/// fn main() -> Result<(), PCDReadError> {
///     let pc = read_pcd("FIELDS x y z\nPOINTS 1\nDATA ascii\n1 2 3\n".as_bytes())?;
///     println!("{}", pc.number_of_points);
///     Ok(())
/// }
/// ```
pub fn read_pcd<R: Read>(r: R) -> Result<PointCloud<PointXyz<f64>>> {
    let reader = BufReader::new(r);
    Parser::new(reader).parse()
}

/// Represents possible error scenarios when attempting to parse a point cloud data format file.
#[derive(Error, Debug)]
pub enum PCDReadError {
    /// The file could not be opened or read.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    /// A recognised header keyword carried a value that could not be parsed.
    #[error("Invalid header while parsing {section:?}. {error_msg:?}\n\t{actual_line:?}")]
    InvalidHeader {
        /// The keyword whose line is malformed
        section: String,
        /// A custom error messaging describing the error
        error_msg: String,
        /// The line which caused the error
        actual_line: String,
    },
    /// `DATA` named a storage mode other than ascii or binary, or the header
    /// ended without a `DATA` line.
    #[error("Unsupported PCD data format: {0}")]
    UnsupportedDataType(String),
    /// A value in an ascii payload is not a number.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

struct Parser<R: BufRead> {
    reader: R,
    line: String,
    raw: Vec<u8>,
}

impl<R: BufRead> Parser<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            raw: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<PointCloud<PointXyz<f64>>> {
        let header = self.parse_header()?;
        self.parse_data(&header)
    }

    /// Consumes header lines up to and including the first `DATA` line.
    fn parse_header(&mut self) -> Result<PCDHeader> {
        let mut header = PCDHeader {
            version: "0.7".to_string(),
            fields: Vec::new(),
            sizes: Vec::new(),
            types: Vec::new(),
            counts: Vec::new(),
            width: 0,
            height: 0,
            viewpoint: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            points: 0,
            data_type: PCDDataType::Ascii,
            data_offset: 0,
        };

        loop {
            let consumed = match self.next_line()? {
                Some(consumed) => consumed,
                None => {
                    return Err(PCDReadError::UnsupportedDataType(
                        "unknown (no DATA line)".to_string(),
                    ))
                }
            };
            header.data_offset += consumed as u64;

            let line = self.line.clone();
            let mut tokens = line.split_whitespace();
            let keyword = match tokens.next() {
                Some(keyword) => keyword,
                None => continue,
            };
            let rest = tokens.collect::<Vec<&str>>();

            match keyword {
                "VERSION" => header.version = self.parse_value::<String>("VERSION", &rest)?,
                "FIELDS" => header.fields = rest.iter().map(|s| s.to_string()).collect(),
                "SIZE" => header.sizes = self.parse_vec("SIZE", &rest)?,
                "TYPE" => header.types = self.parse_vec::<PCDFieldType>("TYPE", &rest)?,
                "COUNT" => header.counts = self.parse_vec("COUNT", &rest)?,
                "WIDTH" => header.width = self.parse_value("WIDTH", &rest)?,
                "HEIGHT" => header.height = self.parse_value("HEIGHT", &rest)?,
                "VIEWPOINT" => header.viewpoint = self.parse_vec("VIEWPOINT", &rest)?,
                "POINTS" => header.points = self.parse_value("POINTS", &rest)?,
                "DATA" => {
                    let mode = rest.first().copied().unwrap_or_default();
                    header.data_type = mode
                        .parse::<PCDDataType>()
                        .map_err(PCDReadError::UnsupportedDataType)?;
                    break;
                }
                _ => trace!("skipping pcd header line {:?}", self.line),
            }
        }

        debug!(
            "pcd header: fields {:?}, {} points, {} data at byte {}",
            header.fields, header.points, header.data_type, header.data_offset
        );
        Ok(header)
    }

    fn parse_data(self, header: &PCDHeader) -> Result<PointCloud<PointXyz<f64>>> {
        match header.data_type() {
            PCDDataType::Ascii => self.parse_ascii_data(),
            PCDDataType::Binary => self.parse_binary_data(header),
        }
    }

    /// Every non-blank line contributes its first three values, whatever the
    /// declared field order. The declared point count is not consulted.
    fn parse_ascii_data(self) -> Result<PointCloud<PointXyz<f64>>> {
        let mut points = Vec::new();
        for line in self.reader.lines() {
            let line = line.map_err(PCDReadError::IOError)?;
            let values = line
                .split_whitespace()
                .map(|token| {
                    token
                        .parse::<f64>()
                        .map_err(|e| PCDReadError::InvalidData(format!("{e}: {token:?}")))
                })
                .collect::<Result<Vec<f64>>>()?;

            if values.len() < 3 {
                if !values.is_empty() {
                    trace!("skipping pcd line with {} values", values.len());
                }
                continue;
            }
            points.push(PointXyz::new(values[0], values[1], values[2]));
        }
        Ok(PointCloud::from_points(points))
    }

    /// One little-endian f32 per declared field, for each declared point.
    /// Decoding stops at the first record that cannot be read in full.
    fn parse_binary_data(mut self, header: &PCDHeader) -> Result<PointCloud<PointXyz<f64>>> {
        let declared = header.points() as usize;
        let width = header.fields().len();
        let indices = header.coordinate_indices();

        if width < 3 {
            debug!("pcd binary payload has {width} field(s) per record, no point can be read");
            return Ok(PointCloud::from_points(vec![]).with_declared_points(declared));
        }

        let mut points = Vec::with_capacity(declared.min(MAX_PREALLOCATED_POINTS));
        let mut record = Vec::with_capacity(width);
        for _ in 0..declared {
            let outcome = read_f32_record::<LittleEndian, _>(&mut self.reader, width, &mut record);
            if let RecordRead::Truncated {
                values_read,
                ref source,
            } = outcome
            {
                warn!(
                    "pcd payload ended inside record {} ({} of {} values, {}): keeping {} of {} declared points",
                    points.len(),
                    values_read,
                    width,
                    if outcome.is_end_of_data() { "end of data" } else { "read error" },
                    points.len(),
                    declared,
                );
                trace!("pcd record read failed: {source}");
                break;
            }

            if record.len() < 3 {
                continue;
            }
            if let Some(point) = indices.select(&record) {
                points.push(PointXyz::<f64>::from(point));
            }
        }

        Ok(PointCloud::from_points(points).with_declared_points(declared))
    }

    fn parse_value<T>(&self, section: &str, rest: &[&str]) -> Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        let value = rest
            .first()
            .ok_or_else(|| self.header_err(section, "Expected a value".to_string()))?;
        value
            .parse::<T>()
            .map_err(|e| self.header_err(section, format!("{e:?}")))
    }

    fn parse_vec<T>(&self, section: &str, rest: &[&str]) -> Result<Vec<T>>
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        rest.iter()
            .map(|s| s.parse::<T>())
            .collect::<std::result::Result<Vec<T>, T::Err>>()
            .map_err(|e| self.header_err(section, format!("{e:?}")))
    }

    /// Reads the next raw line into `self.line`, trimmed. Returns the number
    /// of bytes consumed, or `None` once the header cannot continue: either
    /// the stream is exhausted or the line is not text, which means the
    /// binary payload has been reached.
    fn next_line(&mut self) -> Result<Option<usize>> {
        self.raw.clear();
        self.line.clear();
        let consumed = self
            .reader
            .read_until(b'\n', &mut self.raw)
            .map_err(PCDReadError::IOError)?;
        if consumed == 0 {
            return Ok(None);
        }
        match std::str::from_utf8(&self.raw) {
            Ok(text) => {
                self.line.push_str(text.trim());
                Ok(Some(consumed))
            }
            Err(_) => {
                trace!("non-text bytes before the DATA line");
                Ok(None)
            }
        }
    }

    fn header_err(&self, section: &str, error_msg: String) -> PCDReadError {
        PCDReadError::InvalidHeader {
            section: section.to_string(),
            error_msg,
            actual_line: self.line.clone(),
        }
    }
}
