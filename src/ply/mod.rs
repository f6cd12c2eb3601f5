//! Polygon File Format (PLY)
//!
//! Only vertex coordinates are read. The header's `float`, `float32`,
//! `float64` and `double` properties are collected in declaration order and
//! x, y and z are looked up among them by name; a file lacking any of the
//! three is rejected before its payload is touched.
//!
//! Binary payloads are decoded as one 4-byte float per collected property.
//! Properties of any other type, and the upper half of 8-byte values, are
//! not part of that stride, so binary files carrying them decode incorrectly.

mod data_types;
mod reader;

pub use data_types::{PlyEncoding, PlyHeader};
pub use reader::{read_ply, read_ply_file, read_ply_header, PlyReadError};
