//! Fixed-width binary records made of consecutive 4-byte floats.

use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{self, Read};

/// Outcome of reading one binary record.
#[derive(Debug)]
pub enum RecordRead {
    /// Every value of the record was read.
    Complete,
    /// The stream ran dry (or failed) after `values_read` values.
    ///
    /// A clean end of data and an unreadable stream are treated alike: both
    /// end the decode and keep what was read before.
    Truncated { values_read: usize, source: io::Error },
}

impl RecordRead {
    /// True when the failure is a plain short read rather than a lower level
    /// I/O fault. Only used to word the log message.
    pub fn is_end_of_data(&self) -> bool {
        match self {
            Self::Complete => false,
            Self::Truncated { source, .. } => source.kind() == io::ErrorKind::UnexpectedEof,
        }
    }
}

/// Reads `width` floats in byte order `B` into `record`, replacing its
/// previous contents.
pub fn read_f32_record<B, R>(reader: &mut R, width: usize, record: &mut Vec<f32>) -> RecordRead
where
    B: ByteOrder,
    R: Read,
{
    record.clear();
    for _ in 0..width {
        match reader.read_f32::<B>() {
            Ok(value) => record.push(value),
            Err(source) => {
                return RecordRead::Truncated {
                    values_read: record.len(),
                    source,
                }
            }
        }
    }
    RecordRead::Complete
}
