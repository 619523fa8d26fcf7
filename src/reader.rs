use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::trace;

use crate::options::DecodeOptions;
use crate::records::{Record, RecordHeader};
use crate::{Error, Result};

/// Iterator of decoded records from a byte stream of known length.
///
/// Iteration ends cleanly when the offset reaches the stream length. A record
/// that does not fit in the remaining length is an [Error::OutOfBounds]. After
/// the first error the iterator is exhausted.
pub struct RecordReader<R>
where
    R: Read,
{
    reader: R,
    offset: u64,
    len: u64,
    options: DecodeOptions,
    done: bool,
}

impl<R> RecordReader<R>
where
    R: Read,
{
    /// Read records from `reader`, which holds `len` bytes of GSF data.
    pub fn new(reader: R, len: u64) -> Self {
        Self::with_options(reader, len, DecodeOptions::default())
    }

    pub fn with_options(reader: R, len: u64, options: DecodeOptions) -> Self {
        RecordReader {
            reader,
            offset: 0,
            len,
            options,
            done: false,
        }
    }

    /// Offset of the next record to be read.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn read_record(&mut self) -> Result<Record> {
        let offset = self.offset;
        let header = read_header(&mut self.reader, offset, self.len)?;
        let mut data = vec![0u8; header.size_data as usize];
        read_exact_within(
            &mut self.reader,
            offset + header.len() as u64,
            self.len,
            &mut data,
        )?;
        self.offset += header.size_total();

        Record::decode(offset, header, data, &self.options)
    }
}

/// Fill `buf` from `reader`, which is at `pos` of a stream of `len` bytes.
fn read_exact_within<R: Read>(reader: &mut R, pos: u64, len: u64, buf: &mut [u8]) -> Result<()> {
    let wanted = buf.len();
    let available = len.saturating_sub(pos);
    let out_of_bounds = Error::OutOfBounds {
        offset: pos as usize,
        wanted,
        available: available as usize,
    };
    if wanted as u64 > available {
        return Err(out_of_bounds);
    }
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Err(out_of_bounds),
        Err(err) => Err(err.into()),
    }
}

/// Read the header of the record at `offset` of a stream of `len` bytes, leaving
/// `reader` at the start of the payload.
///
/// # Errors
/// * [Error::OutOfBounds] if the header, or the payload it declares, does not fit
///   in the stream
/// * [Error::UnknownRecordType]
pub(crate) fn read_header<R: Read>(reader: &mut R, offset: u64, len: u64) -> Result<RecordHeader> {
    let mut buf = [0u8; RecordHeader::LEN + RecordHeader::CHECKSUM_LEN];
    read_exact_within(reader, offset, len, &mut buf[..RecordHeader::LEN])?;

    let record_id = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let header_len = if RecordHeader::has_checksum(record_id) {
        read_exact_within(
            reader,
            offset + RecordHeader::LEN as u64,
            len,
            &mut buf[RecordHeader::LEN..],
        )?;
        buf.len()
    } else {
        RecordHeader::LEN
    };
    let header = RecordHeader::decode(&buf[..header_len])?;
    trace!(
        offset,
        record_type = %header.record_type,
        size = header.size_data,
        checksum = header.checksum.is_some(),
        "record"
    );

    let data_offset = offset + header_len as u64;
    let available = len.saturating_sub(data_offset);
    if u64::from(header.size_data) > available {
        return Err(Error::OutOfBounds {
            offset: data_offset as usize,
            wanted: header.size_data as usize,
            available: available as usize,
        });
    }
    Ok(header)
}

impl<R> Iterator for RecordReader<R>
where
    R: Read,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.len {
            return None;
        }
        match self.read_record() {
            Ok(record) => Some(Ok(record)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Open a GSF file for reading.
///
/// # Errors
/// [Error::Io] if the file cannot be opened or its size determined.
pub fn open<P: AsRef<Path>>(path: P) -> Result<RecordReader<BufReader<File>>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    Ok(RecordReader::new(BufReader::new(file), len))
}

/// Return an [Iterator] of records decoded from an in-memory GSF file.
///
/// # Examples
/// ```
/// use gsf::{read_records, RecordType};
///
/// let mut dat: Vec<u8> = vec![
///     0x00, 0x00, 0x00, 0x0c, // payload size
///     0x00, 0x00, 0x00, 0x01, // record id: header
/// ];
/// dat.extend(b"GSF-v03.09\0\0");
///
/// let records: Vec<_> = read_records(&dat).collect::<gsf::Result<_>>().unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].record_type(), RecordType::Header);
/// ```
#[must_use]
pub fn read_records(dat: &[u8]) -> RecordReader<&[u8]> {
    RecordReader::new(dat, dat.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RecordBody, RecordType};

    fn frame(record_id: u32, checksum: Option<u32>, payload: &[u8]) -> Vec<u8> {
        let mut dat = (payload.len() as u32).to_be_bytes().to_vec();
        dat.extend(record_id.to_be_bytes());
        if let Some(checksum) = checksum {
            dat.extend(checksum.to_be_bytes());
        }
        dat.extend(payload);
        dat
    }

    fn comment(text: &str) -> Vec<u8> {
        let mut dat = vec![0, 0, 0, 1, 0, 0, 0, 0];
        dat.extend((text.len() as u32).to_be_bytes());
        dat.extend(text.as_bytes());
        dat
    }

    #[test]
    fn offsets_advance_by_total_size() {
        let mut dat = frame(1, None, b"GSF-v03.09\0\0");
        dat.extend(frame(6 | RecordHeader::CHECKSUM_MASK, Some(0x1234_5678), &comment("abc")));
        dat.extend(frame(6, None, &comment("z")));

        let records: Vec<Record> = read_records(&dat).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].offset, 0);
        assert_eq!(records[1].offset, 20);
        assert_eq!(records[1].header.checksum, Some(0x1234_5678));
        assert_eq!(records[2].offset, 20 + 12 + 15);
        assert_eq!(records[2].offset + records[2].header.size_total(), dat.len() as u64);
    }

    #[test]
    fn empty_stream() {
        assert!(read_records(&[]).next().is_none());
    }

    #[test]
    fn truncated_payload_is_out_of_bounds() {
        // Short payloads are an error, never silently truncated
        let mut dat = frame(6, None, &comment("hello"));
        dat.truncate(dat.len() - 2);
        let mut reader = read_records(&dat);

        let err = reader.next().unwrap().unwrap_err();
        assert!(
            matches!(err, Error::OutOfBounds { offset: 8, wanted: 17, available: 15 }),
            "{err:?}"
        );
        assert!(reader.next().is_none());
    }

    #[test]
    fn truncated_header_is_out_of_bounds() {
        let dat = frame(6, None, &comment("x"));
        let mut dat2 = dat.clone();
        dat2.extend(&dat[..5]);
        let mut reader = read_records(&dat2);

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }), "{err:?}");
        assert!(reader.next().is_none());
    }

    #[test]
    fn unknown_record_type_is_fatal() {
        let mut dat = frame(13, None, &[0; 4]);
        dat.extend(frame(6, None, &comment("never read")));
        let mut reader = read_records(&dat);

        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::UnknownRecordType(13)), "{err:?}");
        assert!(reader.next().is_none());
    }

    #[test]
    fn declared_length_shorter_than_stream() {
        let mut dat = frame(6, None, &comment("a"));
        let len = dat.len() as u64;
        dat.extend([0xff; 7]);
        let records: Vec<Record> = RecordReader::new(dat.as_slice(), len)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn unimplemented_record_is_yielded() {
        let dat = frame(10, None, &[1, 2, 3, 4]);
        let record = read_records(&dat).next().unwrap().unwrap();
        assert_eq!(record.record_type(), RecordType::SingleBeamPing);
        assert_eq!(record.body, RecordBody::SingleBeamPing);
        assert_eq!(record.data, vec![1, 2, 3, 4]);
    }
}
