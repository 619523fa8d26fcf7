//! Record extents and parallel decoding.
//!
//! Framing is inherently sequential since each record's position depends on the
//! size of the one before it. Once extents are known, payloads can be decoded
//! independently.
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::ops::Range;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::options::DecodeOptions;
use crate::reader::read_header;
use crate::records::{Record, RecordHeader};
use crate::{Error, Result};

/// Location of a single record in a stream.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordExtent {
    /// Offset of the record header
    pub offset: u64,
    pub header: RecordHeader,
}

impl RecordExtent {
    #[must_use]
    pub fn payload_offset(&self) -> u64 {
        self.offset + self.header.len() as u64
    }

    /// Byte range of the payload in the stream.
    #[must_use]
    pub fn payload_range(&self) -> Range<u64> {
        let start = self.payload_offset();
        start..start + u64::from(self.header.size_data)
    }

    /// Offset of the following record.
    #[must_use]
    pub fn end(&self) -> u64 {
        self.offset + self.header.size_total()
    }
}

/// [Iterator] of [RecordExtent]s that skips over payloads without reading them.
/// After the first error the iterator is exhausted.
pub struct ExtentReader<R>
where
    R: Read + Seek,
{
    reader: R,
    offset: u64,
    len: u64,
    done: bool,
}

impl<R> ExtentReader<R>
where
    R: Read + Seek,
{
    /// Scan `len` bytes starting at the current position of `reader`.
    pub fn new(reader: R, len: u64) -> Self {
        ExtentReader {
            reader,
            offset: 0,
            len,
            done: false,
        }
    }

    fn read_extent(&mut self) -> Result<RecordExtent> {
        let offset = self.offset;
        let header = read_header(&mut self.reader, offset, self.len)?;
        self.reader.seek(SeekFrom::Current(i64::from(header.size_data)))?;
        let extent = RecordExtent { offset, header };
        self.offset = extent.end();
        Ok(extent)
    }
}

impl<R> Iterator for ExtentReader<R>
where
    R: Read + Seek,
{
    type Item = Result<RecordExtent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.len {
            return None;
        }
        match self.read_extent() {
            Ok(extent) => Some(Ok(extent)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Scan the record extents of an entire seekable stream, e.g., a [std::fs::File].
///
/// # Errors
/// [Error::Io] if the length of the stream cannot be determined.
pub fn scan<R>(mut reader: R) -> Result<ExtentReader<R>>
where
    R: Read + Seek,
{
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(ExtentReader::new(reader, len))
}

/// Decode all records of an in-memory GSF file using the rayon global thread pool.
///
/// Records are framed sequentially, then decoded in parallel. Results are in
/// file order. Unlike [crate::RecordReader], a record that fails to decode does
/// not stop the records after it from being decoded. A framing error is the last
/// result, since no record after it can be located.
#[must_use]
pub fn decode_par(dat: &[u8], options: &DecodeOptions) -> Vec<Result<Record>> {
    let mut extents = Vec::new();
    let mut framing_error = None;
    for zult in ExtentReader::new(Cursor::new(dat), dat.len() as u64) {
        match zult {
            Ok(extent) => extents.push(extent),
            Err(err) => framing_error = Some(err),
        }
    }

    let mut records: Vec<Result<Record>> = extents
        .into_par_iter()
        .map(|extent| {
            let range = extent.payload_range();
            let data = dat
                .get(range.start as usize..range.end as usize)
                .ok_or(Error::OutOfBounds {
                    offset: range.start as usize,
                    wanted: extent.header.size_data as usize,
                    available: dat.len().saturating_sub(range.start as usize),
                })?;
            Record::decode(extent.offset, extent.header, data.to_vec(), options)
        })
        .collect();
    records.extend(framing_error.map(Err));
    records
}
